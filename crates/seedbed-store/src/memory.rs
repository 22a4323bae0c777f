use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use seedbed_generate::GeneratedDocument;

use crate::client::{BatchReceipt, StoreClient, StoreError};

/// In-memory store backend for tests and demos.
///
/// Documents are kept in their wire form, keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: Mutex<BTreeMap<String, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().map(|store| store.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn document(&self, id: &str) -> Option<Value> {
        self.documents
            .lock()
            .ok()
            .and_then(|store| store.get(id).cloned())
    }

    /// Ids of every stored document of the given type, in id order.
    pub fn ids_of_type(&self, doc_type: &str) -> Vec<String> {
        self.documents
            .lock()
            .map(|store| {
                store
                    .iter()
                    .filter(|(_, document)| {
                        document.get("_type").and_then(Value::as_str) == Some(doc_type)
                    })
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl StoreClient for InMemoryStore {
    async fn create_batch(
        &self,
        documents: &[GeneratedDocument],
    ) -> Result<BatchReceipt, StoreError> {
        let mut store = self
            .documents
            .lock()
            .map_err(|_| StoreError::Create("store lock poisoned".to_string()))?;

        for document in documents {
            if store.contains_key(&document.id) {
                return Err(StoreError::Create(format!(
                    "document '{}' already exists",
                    document.id
                )));
            }
        }
        for document in documents {
            store.insert(document.id.clone(), document.to_store_value());
        }

        Ok(BatchReceipt {
            count: documents.len() as u64,
        })
    }

    async fn delete_by_types(&self, type_names: &[String]) -> Result<(), StoreError> {
        let mut store = self
            .documents
            .lock()
            .map_err(|_| StoreError::Delete("store lock poisoned".to_string()))?;

        store.retain(|_, document| {
            document
                .get("_type")
                .and_then(Value::as_str)
                .map(|doc_type| !type_names.iter().any(|name| name == doc_type))
                .unwrap_or(true)
        });

        Ok(())
    }
}
