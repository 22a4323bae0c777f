use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::path::FieldPath;

/// Kind of a schema field, as reported by the schema source.
///
/// Kinds the generator cannot produce values for deserialize to `Other`;
/// they stay selectable but never contribute a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Slug,
    Number,
    Reference,
    Array,
    Other,
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "string" => FieldKind::String,
            "slug" => FieldKind::Slug,
            "number" => FieldKind::Number,
            "reference" => FieldKind::Reference,
            "array" => FieldKind::Array,
            // Anything the generator does not understand stays selectable
            // but produces no value.
            _ => FieldKind::Other,
        })
    }
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Slug => "slug",
            FieldKind::Number => "number",
            FieldKind::Reference => "reference",
            FieldKind::Array => "array",
            FieldKind::Other => "other",
        }
    }

    /// True for kinds that produce a value (directly or via array members).
    pub fn is_generatable(&self) -> bool {
        !matches!(self, FieldKind::Other)
    }
}

/// Target type a reference field may point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceTarget {
    #[serde(rename = "type")]
    pub doc_type: String,
}

impl ReferenceTarget {
    pub fn new(doc_type: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
        }
    }
}

/// Read-only description of a single schema field.
///
/// Array fields carry their member specs in `of`; reference fields carry
/// their allowed targets in `to`. Member specs inside `of` may omit `name`,
/// in which case the kind keyword stands in as the path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub of: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<ReferenceTarget>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            of: Vec::new(),
            to: Vec::new(),
        }
    }

    pub fn with_members(mut self, of: Vec<FieldSpec>) -> Self {
        self.of = of;
        self
    }

    pub fn with_targets(mut self, to: Vec<ReferenceTarget>) -> Self {
        self.to = to;
        self
    }

    /// Segment this spec answers to in a [`FieldPath`].
    pub fn path_key(&self) -> &str {
        if self.name.is_empty() {
            self.kind.as_str()
        } else {
            self.name.as_str()
        }
    }
}

/// A document type exposed by the schema source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentTypeSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Icon identifier for rendering layers; opaque to the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSpec>,
}

impl DocumentTypeSpec {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            title: None,
            icon: None,
            fields,
        }
    }

    /// Resolve a field path against this type, descending through array
    /// member specs for nested segments.
    pub fn field(&self, path: &FieldPath) -> Option<&FieldSpec> {
        let mut specs = self.fields.as_slice();
        let mut resolved = None;
        for segment in path.segments() {
            let spec = specs.iter().find(|spec| spec.path_key() == segment)?;
            specs = spec.of.as_slice();
            resolved = Some(spec);
        }
        resolved
    }
}

/// Immutable directory of document types supplied by the schema source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SchemaDirectory {
    /// Schema contract version for directory artifacts.
    pub schema_version: String,
    pub types: Vec<DocumentTypeSpec>,
}

impl SchemaDirectory {
    pub fn new(types: Vec<DocumentTypeSpec>) -> Self {
        Self {
            schema_version: crate::SCHEMA_VERSION.to_string(),
            types,
        }
    }

    pub fn doc_type(&self, name: &str) -> Option<&DocumentTypeSpec> {
        self.types.iter().find(|doc_type| doc_type.name == name)
    }

    pub fn contains_type(&self, name: &str) -> bool {
        self.doc_type(name).is_some()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|doc_type| doc_type.name.as_str())
    }
}
