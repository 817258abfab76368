//! Chat session
//!
//! A [`ChatSession`] owns the buffer/store/reducer triple for one chat UI
//! session and saves each finished artifact through a
//! [`DocumentRepository`].

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::persistence::{DocumentRecord, DocumentRepository};
use canvas_artifact::{Artifact, ArtifactKind, Delta, Metadata};
use canvas_stream::{ArtifactStore, Completion, DeltaBuffer, KindRegistry, StreamReducer};
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

/// One chat session's streaming state
pub struct ChatSession {
    id: Uuid,
    config: SessionConfig,
    reducer: StreamReducer,
    repository: Arc<dyn DocumentRepository>,
    seeded_kind: Option<ArtifactKind>,
    saved: usize,
}

impl ChatSession {
    /// Create session with the built-in kinds, filtered by the config
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Reducer`] if the reducer cannot be wired.
    pub fn new(
        config: SessionConfig,
        repository: Arc<dyn DocumentRepository>,
    ) -> Result<Self, SessionError> {
        let registry = Arc::new(KindRegistry::from_config(&config.stream));
        Self::with_registry(config, registry, repository)
    }

    /// Create session with an explicit kind registry
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Reducer`] if the reducer cannot be wired.
    pub fn with_registry(
        config: SessionConfig,
        registry: Arc<KindRegistry>,
        repository: Arc<dyn DocumentRepository>,
    ) -> Result<Self, SessionError> {
        let reducer = StreamReducer::builder()
            .buffer(DeltaBuffer::new())
            .store(ArtifactStore::new())
            .registry(registry)
            .config(config.stream.clone())
            .build()?;

        let id = Uuid::new_v4();
        tracing::debug!(session = %id, user = %config.user_id, "Session started");

        Ok(Self {
            id,
            config,
            reducer,
            repository,
            seeded_kind: None,
            saved: 0,
        })
    }

    /// Session id
    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Session configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Delta buffer handle (producer side)
    #[inline]
    #[must_use]
    pub fn buffer(&self) -> &DeltaBuffer {
        self.reducer.buffer()
    }

    /// Artifact store handle (observer side)
    #[inline]
    #[must_use]
    pub fn store(&self) -> &ArtifactStore {
        self.reducer.store()
    }

    /// Current artifact, if any
    #[must_use]
    pub fn artifact(&self) -> Option<Artifact> {
        self.store().artifact()
    }

    /// Documents saved so far
    #[inline]
    #[must_use]
    pub fn saved(&self) -> usize {
        self.saved
    }

    /// Append a delta; returns its buffer index
    pub fn push(&self, delta: Delta) -> usize {
        self.buffer().append(delta)
    }

    /// Fold pending deltas and save every stream that finished
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Persistence`] if a save fails. The deltas are
    /// consumed either way; later saves of the same batch are skipped.
    pub async fn pump(&mut self) -> Result<PumpOutcome, SessionError> {
        let report = self.reducer.process();
        if report.is_noop() {
            return Ok(PumpOutcome::default());
        }

        self.seed_metadata();

        let mut saved = 0;
        if self.config.save_on_finish {
            for completion in &report.completed {
                if self.save(completion).await? {
                    saved += 1;
                }
            }
        }

        Ok(PumpOutcome {
            processed: report.processed,
            saved,
            hook_failures: report.hook_failures.len(),
        })
    }

    /// Pump on every buffer growth until `shutdown` resolves
    ///
    /// Pump errors are logged and do not stop the loop. Returns the total
    /// number of deltas folded.
    pub async fn drive<S>(&mut self, shutdown: S) -> usize
    where
        S: Future<Output = ()>,
    {
        let mut growth = self.buffer().subscribe();
        growth.borrow_and_update();
        let mut total = self.pump_logged().await;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                changed = growth.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    growth.borrow_and_update();
                    total += self.pump_logged().await;
                }
            }
        }

        total + self.pump_logged().await
    }

    /// Detach the session: clear the store, reset the buffer and drop the
    /// cursor
    #[must_use]
    pub fn end(self) -> SessionSummary {
        let summary = SessionSummary {
            id: self.id,
            deltas: self.buffer().len(),
            saved: self.saved,
            artifact: self.artifact(),
        };

        self.store().clear();
        self.buffer().reset();
        tracing::debug!(session = %self.id, saved = self.saved, "Session ended");
        summary
    }

    async fn pump_logged(&mut self) -> usize {
        match self.pump().await {
            Ok(outcome) => outcome.processed,
            Err(e) => {
                tracing::error!(session = %self.id, error = %e, "Pump failed");
                0
            }
        }
    }

    async fn save(&mut self, completion: &Completion) -> Result<bool, SessionError> {
        let Some(record) =
            DocumentRecord::from_artifact(&completion.artifact, &self.config.user_id, Utc::now())
        else {
            tracing::warn!(
                session = %self.id,
                index = completion.index,
                "Finished artifact has no document id; not saved"
            );
            return Ok(false);
        };

        let document_id = record.id.clone();
        self.repository.save_document(record).await?;
        self.saved += 1;
        tracing::info!(
            session = %self.id,
            document = %document_id,
            index = completion.index,
            "Document saved"
        );
        Ok(true)
    }

    /// Seed the current kind's initial metadata when the kind is first shown
    ///
    /// The first kind keeps metadata its hooks already wrote; a later kind
    /// change replaces whatever the previous kind left behind.
    fn seed_metadata(&mut self) {
        let Some(kind) = self.store().kind() else {
            return;
        };
        let previous = self.seeded_kind.replace(kind);
        if previous == Some(kind) {
            return;
        }

        let initial = self
            .reducer
            .registry()
            .lookup(kind)
            .map_or(Metadata::Null, |definition| definition.initial_metadata().clone());
        let switched = previous.is_some();
        self.store().update_metadata(|metadata| {
            if switched || metadata.is_null() {
                initial
            } else {
                metadata.clone()
            }
        });
        tracing::debug!(session = %self.id, %kind, switched, "Metadata seeded");
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("cursor", &self.reducer.cursor())
            .field("saved", &self.saved)
            .finish_non_exhaustive()
    }
}

/// Result of one [`ChatSession::pump`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpOutcome {
    /// Deltas folded
    pub processed: usize,
    /// Documents saved
    pub saved: usize,
    /// Hooks that failed (logged by the reducer)
    pub hook_failures: usize,
}

/// Final state of an ended session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Session id
    pub id: Uuid,
    /// Deltas received
    pub deltas: usize,
    /// Documents saved
    pub saved: usize,
    /// Artifact at the time the session ended
    pub artifact: Option<Artifact>,
}
