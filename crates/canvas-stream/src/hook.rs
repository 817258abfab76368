//! Kind-specific delta hooks
//!
//! A [`DeltaHook`] runs before the generic transition for every delta that
//! arrives while the artifact has the hook's kind.

use crate::store::ArtifactStore;
use canvas_artifact::{ArtifactError, Delta};

/// Per-kind delta handler
///
/// Hooks may call [`ArtifactStore::set`], [`ArtifactStore::set_metadata`]
/// and [`ArtifactStore::update_metadata`] any number of times. Tags the hook
/// does not own must be ignored, not rejected.
///
/// Closures of the right shape implement this trait.
pub trait DeltaHook: Send + Sync {
    /// Handle one delta
    ///
    /// # Errors
    /// Returns error if the hook cannot handle a delta it owns. The reducer
    /// logs the error and carries on with the generic transition.
    fn on_delta(&self, delta: &Delta, store: &ArtifactStore) -> Result<(), HookError>;
}

impl<F> DeltaHook for F
where
    F: Fn(&Delta, &ArtifactStore) -> Result<(), HookError> + Send + Sync,
{
    fn on_delta(&self, delta: &Delta, store: &ArtifactStore) -> Result<(), HookError> {
        self(delta, store)
    }
}

/// Errors raised by kind hooks
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// Payload of an owned tag had the wrong shape
    #[error(transparent)]
    InvalidPayload(#[from] ArtifactError),

    /// Metadata had a shape the hook cannot extend
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    /// Any other hook failure
    #[error("{0}")]
    Failed(String),
}
