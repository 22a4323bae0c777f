use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use seedbed_core::{FieldKind, FieldPath};

/// Selection state for one enabled field.
///
/// Presence of an entry means "include this field when generating"; absence
/// means "skip". `min`/`max` only affect number fields; `to` holds the
/// enabled target-type names of a reference field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SelectionEntry {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub to: BTreeSet<String>,
}

impl SelectionEntry {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            min: None,
            max: None,
            to: BTreeSet::new(),
        }
    }
}

/// Per-type slice of the manifest: how many documents to create and which
/// fields to fill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeManifestEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<FieldPath, SelectionEntry>,
}

impl TypeManifestEntry {
    /// Number of documents this entry asks for; an absent count counts as 0.
    pub fn effective_count(&self) -> u64 {
        self.count.unwrap_or(0)
    }

    /// An entry with no fields and no count carries no information and is
    /// removed by pruning.
    pub fn is_prunable(&self) -> bool {
        self.count.is_none() && self.fields.is_empty()
    }
}

/// User-configured selection of document types, counts, and fields to
/// generate. Iteration order is the sorted type-name order, which also fixes
/// the generation output order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Manifest {
    types: BTreeMap<String, TypeManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeManifestEntry> {
        self.types.get(type_name)
    }

    /// Iterate type entries in manifest order.
    pub fn types(&self) -> impl Iterator<Item = (&str, &TypeManifestEntry)> {
        self.types.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Names of the types present in the manifest, in manifest order.
    pub fn type_names(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }

    /// Total number of documents the manifest asks for.
    pub fn total_count(&self) -> u64 {
        self.types
            .values()
            .map(TypeManifestEntry::effective_count)
            .sum()
    }

    pub(crate) fn get_mut(&mut self, type_name: &str) -> Option<&mut TypeManifestEntry> {
        self.types.get_mut(type_name)
    }

    pub(crate) fn entry_mut(&mut self, type_name: &str) -> &mut TypeManifestEntry {
        self.types.entry(type_name.to_string()).or_default()
    }

    /// Drop type entries that carry no information.
    pub(crate) fn prune(&mut self) {
        self.types.retain(|_, entry| !entry.is_prunable());
    }
}
