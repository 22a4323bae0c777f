use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use seedbed_core::FieldPath;

use crate::values::GeneratedValue;

/// Options for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for reproducibility; the same seed and manifest produce the
    /// same batch.
    pub seed: u64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { seed: 0 }
    }
}

/// A generated document: identity plus filled field values.
///
/// Created id-and-type-only in the stub phase so same-batch references can
/// resolve, then filled; treated as immutable once handed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDocument {
    pub id: String,
    pub doc_type: String,
    pub values: BTreeMap<FieldPath, GeneratedValue>,
}

impl GeneratedDocument {
    pub fn stub(id: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            doc_type: doc_type.into(),
            values: BTreeMap::new(),
        }
    }

    /// Wire form of the document: `_id`/`_type` discriminators with the
    /// generated values flattened onto the object by field path.
    pub fn to_store_value(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("_id".to_string(), json!(self.id));
        doc.insert("_type".to_string(), json!(self.doc_type));
        for (path, value) in &self.values {
            doc.insert(path.to_string(), value.to_json());
        }
        Value::Object(doc)
    }
}

/// Summary of one generated document type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeReport {
    pub doc_type: String,
    pub requested: u64,
    pub generated: u64,
}

/// Structured generation issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationIssue {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub types: Vec<TypeReport>,
    pub warnings: Vec<GenerationIssue>,
    pub warnings_by_code: BTreeMap<String, u64>,
}

impl GenerationReport {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            types: Vec::new(),
            warnings: Vec::new(),
            warnings_by_code: BTreeMap::new(),
        }
    }

    pub fn record_warning(&mut self, issue: GenerationIssue) {
        *self.warnings_by_code.entry(issue.code.clone()).or_insert(0) += 1;
        self.warnings.push(issue);
    }
}

/// Result of a generation run: the ordered batch plus its report.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub documents: Vec<GeneratedDocument>,
    pub report: GenerationReport,
}
