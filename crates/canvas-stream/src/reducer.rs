//! Streaming artifact reducer
//!
//! Provides [`StreamReducer`], which folds every new delta of a
//! [`DeltaBuffer`] into the [`ArtifactStore`] exactly once: the current
//! kind's hook first, then the generic transition.

use crate::buffer::DeltaBuffer;
use crate::config::StreamConfig;
use crate::hook::HookError;
use crate::registry::KindRegistry;
use crate::store::ArtifactStore;
use canvas_artifact::{transition, Artifact, Delta, DeltaKind};
use std::future::Future;
use std::sync::Arc;

/// Consumer of one delta buffer
///
/// # Invariants
/// - `cursor` is the index of the last folded delta (`None` before the first)
/// - `cursor` never decreases and is committed before a batch is folded, so
///   each delta reaches the hook and the generic transition at most once
/// - Hook lookup uses the artifact kind current at each delta (the default
///   kind while no artifact exists); a kind delta takes effect from the next
///   delta on
#[derive(Debug)]
pub struct StreamReducer {
    buffer: DeltaBuffer,
    store: ArtifactStore,
    registry: Arc<KindRegistry>,
    config: StreamConfig,
    cursor: Option<usize>,
}

impl StreamReducer {
    /// Start building a reducer
    #[inline]
    #[must_use]
    pub fn builder() -> ReducerBuilder {
        ReducerBuilder::default()
    }

    /// Index of the last folded delta
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Buffer this reducer consumes
    #[inline]
    #[must_use]
    pub fn buffer(&self) -> &DeltaBuffer {
        &self.buffer
    }

    /// Store this reducer publishes to
    #[inline]
    #[must_use]
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Registry consulted for kind hooks
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// Fold every delta appended since the last call
    ///
    /// A call with no buffer growth is a no-op. Never fails: hook errors are
    /// logged and reported, and the generic transition still runs for the
    /// failing delta and every delta after it.
    pub fn process(&mut self) -> ReduceReport {
        let start = self.cursor.map_or(0, |c| c + 1);
        let batch = self.buffer.since(start);
        if batch.is_empty() {
            return ReduceReport::empty(self.cursor);
        }

        self.cursor = Some(start + batch.len() - 1);
        let mut report = ReduceReport::empty(self.cursor);

        for (offset, delta) in batch.iter().enumerate() {
            let index = start + offset;
            if self.config.trace_deltas {
                tracing::trace!(index, kind = %delta.kind, "folding delta");
            }

            if let Err(error) = self.run_hook(delta) {
                tracing::warn!(index, kind = %delta.kind, %error, "artifact hook failed");
                report.hook_failures.push(HookFailure {
                    index,
                    kind: delta.kind.clone(),
                    error: error.to_string(),
                });
            }

            let mut was_streaming = false;
            let next = self.store.set(|prev| {
                was_streaming = prev.is_some_and(Artifact::is_streaming);
                transition(prev, delta)
            });
            if was_streaming && !next.is_streaming() {
                report.completed.push(Completion {
                    index,
                    artifact: next,
                });
            }
            report.processed += 1;
        }

        report
    }

    fn run_hook(&self, delta: &Delta) -> Result<(), HookError> {
        // An absent artifact has the default kind
        let kind = self.store.kind().unwrap_or_default();
        match self.registry.hook(kind) {
            Some(hook) => hook.on_delta(delta, &self.store),
            None => Ok(()),
        }
    }

    /// Process on every buffer growth until `shutdown` resolves
    ///
    /// Deltas already in the buffer are folded immediately. Returns the total
    /// number of deltas folded by this call.
    pub async fn run<S>(&mut self, shutdown: S) -> usize
    where
        S: Future<Output = ()>,
    {
        let mut growth = self.buffer.subscribe();
        growth.borrow_and_update();
        let mut total = self.process().processed;

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
                    total += self.process().processed;
                }
            }
        }

        // Growth observed together with the shutdown signal
        total + self.process().processed
    }
}

/// Outcome of one [`StreamReducer::process`] call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReduceReport {
    /// Deltas folded by this call
    pub processed: usize,
    /// Cursor after the call
    pub cursor: Option<usize>,
    /// Hook failures, in delta order
    pub hook_failures: Vec<HookFailure>,
    /// Streams that went from streaming to idle, in delta order
    pub completed: Vec<Completion>,
}

impl ReduceReport {
    fn empty(cursor: Option<usize>) -> Self {
        Self {
            processed: 0,
            cursor,
            hook_failures: Vec::new(),
            completed: Vec::new(),
        }
    }

    /// Check if the call folded nothing
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.processed == 0
    }
}

/// Artifact state committed by a delta that ended a stream
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Buffer index of the finishing delta
    pub index: usize,
    /// Artifact as committed by that delta
    pub artifact: Artifact,
}

/// A hook failure isolated by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFailure {
    /// Buffer index of the delta
    pub index: usize,
    /// Tag of the delta
    pub kind: DeltaKind,
    /// Rendered hook error
    pub error: String,
}

/// Errors building a reducer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReducerError {
    /// No delta buffer supplied
    #[error("reducer requires a delta buffer")]
    MissingBuffer,

    /// No artifact store supplied
    #[error("reducer requires an artifact store")]
    MissingStore,
}

/// Builder for [`StreamReducer`]
///
/// Buffer and store are required; the registry defaults to
/// [`KindRegistry::from_config`] over the configured [`StreamConfig`].
#[derive(Debug, Default)]
pub struct ReducerBuilder {
    buffer: Option<DeltaBuffer>,
    store: Option<ArtifactStore>,
    registry: Option<Arc<KindRegistry>>,
    config: StreamConfig,
}

impl ReducerBuilder {
    /// Set the buffer to consume
    #[inline]
    #[must_use]
    pub fn buffer(mut self, buffer: DeltaBuffer) -> Self {
        self.buffer = Some(buffer);
        self
    }

    /// Set the store to publish to
    #[inline]
    #[must_use]
    pub fn store(mut self, store: ArtifactStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the kind registry
    #[inline]
    #[must_use]
    pub fn registry(mut self, registry: Arc<KindRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the configuration
    #[inline]
    #[must_use]
    pub fn config(mut self, config: StreamConfig) -> Self {
        self.config = config;
        self
    }

    /// Build reducer with the cursor before the first delta
    ///
    /// # Errors
    /// Returns error if the buffer or the store is missing
    pub fn build(self) -> Result<StreamReducer, ReducerError> {
        let buffer = self.buffer.ok_or(ReducerError::MissingBuffer)?;
        let store = self.store.ok_or(ReducerError::MissingStore)?;
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(KindRegistry::from_config(&self.config)));

        Ok(StreamReducer {
            buffer,
            store,
            registry,
            config: self.config,
            cursor: None,
        })
    }
}
