use thiserror::Error;
use tracing::{info, warn};

use seedbed_core::SchemaDirectory;
use seedbed_generate::{DocumentGenerator, GenerateOptions, GenerationReport};
use seedbed_manifest::{Manifest, ManifestError, ManifestEvent};

use crate::client::{StoreClient, StoreError};
use crate::notify::{Notification, NotificationSink};

/// Errors surfaced by [`GenerationSession::commit`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// A generation run is already in flight for this session.
    #[error("a generation run is already in flight")]
    Busy,
    /// The manifest asks for no documents.
    #[error("the manifest asks for no documents")]
    NothingToGenerate,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful commit.
#[derive(Debug, Clone)]
pub struct CommitReceipt {
    pub created: u64,
    pub report: GenerationReport,
}

/// One editor session: the manifest being configured, the delete-existing
/// mode, and the commit flow against the store.
///
/// The session owns its manifest exclusively. On a successful commit the
/// manifest resets to empty; on a store failure it is preserved so the user
/// can retry.
#[derive(Debug, Default)]
pub struct GenerationSession {
    manifest: Manifest,
    delete_existing: bool,
    generating: bool,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn delete_existing(&self) -> bool {
        self.delete_existing
    }

    pub fn set_delete_existing(&mut self, delete_existing: bool) {
        self.delete_existing = delete_existing;
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Apply one manifest event to the session's manifest.
    pub fn apply(&mut self, event: &ManifestEvent) -> Result<(), ManifestError> {
        self.manifest = seedbed_manifest::apply(&self.manifest, event)?;
        Ok(())
    }

    /// Generate from the current manifest and commit the batch.
    ///
    /// The in-flight flag rejects re-entrant triggering; it is cleared on
    /// every exit path.
    pub async fn commit<C, S>(
        &mut self,
        directory: &SchemaDirectory,
        client: &C,
        sink: &S,
        options: GenerateOptions,
    ) -> Result<CommitReceipt, SessionError>
    where
        C: StoreClient + ?Sized,
        S: NotificationSink + ?Sized,
    {
        if self.generating {
            return Err(SessionError::Busy);
        }
        if self.manifest.total_count() == 0 {
            return Err(SessionError::NothingToGenerate);
        }

        self.generating = true;
        let result = self.run(directory, client, sink, options).await;
        self.generating = false;
        result
    }

    async fn run<C, S>(
        &mut self,
        directory: &SchemaDirectory,
        client: &C,
        sink: &S,
        options: GenerateOptions,
    ) -> Result<CommitReceipt, SessionError>
    where
        C: StoreClient + ?Sized,
        S: NotificationSink + ?Sized,
    {
        let outcome = DocumentGenerator::new(options).generate(&self.manifest, directory);

        if self.delete_existing {
            let type_names = self.manifest.type_names();
            info!(types = type_names.len(), "purging existing documents");
            if let Err(err) = client.delete_by_types(&type_names).await {
                warn!(error = %err, "purge failed, keeping the manifest");
                sink.push(Notification::error("Error", err.to_string()));
                return Err(err.into());
            }
        }

        match client.create_batch(&outcome.documents).await {
            Ok(receipt) => {
                info!(created = receipt.count, "batch committed");
                sink.push(Notification::success(
                    "Success",
                    format!("Created {} documents", receipt.count),
                ));
                self.manifest = Manifest::new();
                Ok(CommitReceipt {
                    created: receipt.count,
                    report: outcome.report,
                })
            }
            Err(err) => {
                warn!(error = %err, "batch create failed, keeping the manifest");
                sink.push(Notification::error("Error", err.to_string()));
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::notify::NullSink;

    fn seeded_session() -> GenerationSession {
        let mut session = GenerationSession::new();
        session
            .apply(&ManifestEvent::SetCount {
                type_name: "post".to_string(),
                raw: "1".to_string(),
            })
            .expect("set count");
        session
    }

    #[tokio::test]
    async fn commit_rejects_reentrant_triggering() {
        let mut session = seeded_session();
        session.generating = true;

        let result = session
            .commit(
                &SchemaDirectory::new(Vec::new()),
                &InMemoryStore::new(),
                &NullSink,
                GenerateOptions::default(),
            )
            .await;
        assert!(matches!(result, Err(SessionError::Busy)));
    }

    #[tokio::test]
    async fn commit_rejects_an_empty_manifest() {
        let mut session = GenerationSession::new();
        let result = session
            .commit(
                &SchemaDirectory::new(Vec::new()),
                &InMemoryStore::new(),
                &NullSink,
                GenerateOptions::default(),
            )
            .await;
        assert!(matches!(result, Err(SessionError::NothingToGenerate)));
    }
}
