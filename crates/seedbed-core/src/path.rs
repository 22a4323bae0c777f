use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Separator used when rendering a path as a single string.
pub const SEPARATOR: char = '.';

/// Structured locator for a (possibly nested) field within a document type.
///
/// A path is a non-empty sequence of segments. The first segment names a
/// top-level field; each further segment selects an array-member spec of the
/// previous one. Paths render as dot-joined strings (`tags.string`) so they
/// can key JSON maps, which is why segments may not contain the separator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Build a path from segments, rejecting empty or separator-bearing ones.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(Error::InvalidPath("path must not be empty".to_string()));
        }
        for segment in &segments {
            validate_segment(segment)?;
        }
        Ok(Self { segments })
    }

    /// Single-segment path naming a top-level field.
    pub fn root(segment: impl Into<String>) -> Result<Self> {
        Self::from_segments([segment.into()])
    }

    /// Extend the path with one more segment, returning a new path.
    pub fn child(&self, segment: impl Into<String>) -> Result<Self> {
        let segment = segment.into();
        validate_segment(&segment)?;
        let mut segments = self.segments.clone();
        segments.push(segment);
        Ok(Self { segments })
    }

    /// The path without its last segment, or `None` for top-level paths.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Last segment of the path.
    pub fn leaf(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// True for paths that name a top-level field directly.
    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 1
    }

    /// True when `prefix` is the path itself or one of its ancestors.
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// True when the path is exactly one segment below `parent`.
    pub fn is_direct_child_of(&self, parent: &FieldPath) -> bool {
        self.segments.len() == parent.segments.len() + 1 && self.starts_with(parent)
    }
}

fn validate_segment(segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(Error::InvalidPath("empty path segment".to_string()));
    }
    if segment.contains(SEPARATOR) {
        return Err(Error::InvalidPath(format!(
            "segment '{segment}' contains the separator '{SEPARATOR}'"
        )));
    }
    Ok(())
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        Self::from_segments(raw.split(SEPARATOR))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

impl schemars::JsonSchema for FieldPath {
    fn schema_name() -> String {
        "FieldPath".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        <String as schemars::JsonSchema>::json_schema(generator)
    }
}
