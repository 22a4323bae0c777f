use async_trait::async_trait;
use thiserror::Error;

use seedbed_generate::GeneratedDocument;

/// Errors surfaced by a document-store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("batch create failed: {0}")]
    Create(String),
    #[error("delete failed: {0}")]
    Delete(String),
}

/// Acknowledgement for a committed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReceipt {
    pub count: u64,
}

/// Trait implemented by document-store backends.
#[async_trait]
pub trait StoreClient {
    /// Persist a batch of generated documents atomically.
    async fn create_batch(
        &self,
        documents: &[GeneratedDocument],
    ) -> Result<BatchReceipt, StoreError>;

    /// Remove every stored document whose type is in `type_names`.
    async fn delete_by_types(&self, type_names: &[String]) -> Result<(), StoreError>;
}
