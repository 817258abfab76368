//! Artifact state store
//!
//! Provides [`ArtifactStore`], the session-scoped holder of the current
//! artifact (or its absence) and the opaque kind metadata.

use canvas_artifact::{Artifact, ArtifactKind, Metadata};
use std::sync::Arc;
use tokio::sync::watch;

/// Current artifact and metadata, with change notification
///
/// A cheap-to-clone capability handle: the reducer, kind hooks and UI
/// observers all hold clones of the same store.
///
/// # Contract
/// - [`ArtifactStore::set`] invokes its updater exactly once and publishes
///   the result before returning
/// - Updaters must be pure and must not call back into the store
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    artifact: watch::Sender<Option<Artifact>>,
    metadata: watch::Sender<Metadata>,
}

impl ArtifactStore {
    /// Create store with no artifact and `null` metadata
    #[must_use]
    pub fn new() -> Self {
        let (artifact, _) = watch::channel(None);
        let (metadata, _) = watch::channel(Metadata::Null);
        Self {
            inner: Arc::new(StoreInner { artifact, metadata }),
        }
    }

    /// Current `(artifact, metadata)` pair
    #[must_use]
    pub fn get(&self) -> (Option<Artifact>, Metadata) {
        (self.artifact(), self.metadata())
    }

    /// Current artifact, if any
    #[must_use]
    pub fn artifact(&self) -> Option<Artifact> {
        self.inner.artifact.borrow().clone()
    }

    /// Kind of the current artifact, without cloning it
    #[must_use]
    pub fn kind(&self) -> Option<ArtifactKind> {
        self.inner.artifact.borrow().as_ref().map(|a| a.kind)
    }

    /// Current metadata
    #[must_use]
    pub fn metadata(&self) -> Metadata {
        self.inner.metadata.borrow().clone()
    }

    /// Replace the artifact with a function of its previous value
    ///
    /// Returns the committed artifact.
    pub fn set<F>(&self, updater: F) -> Artifact
    where
        F: FnOnce(Option<&Artifact>) -> Artifact,
    {
        let mut committed = None;
        self.inner.artifact.send_modify(|slot| {
            let next = updater(slot.as_ref());
            committed = Some(next.clone());
            *slot = Some(next);
        });
        committed.unwrap_or_default()
    }

    /// Replace metadata unconditionally
    pub fn set_metadata(&self, value: Metadata) {
        self.inner.metadata.send_replace(value);
    }

    /// Replace metadata with a function of its previous value
    pub fn update_metadata<F>(&self, updater: F)
    where
        F: FnOnce(&Metadata) -> Metadata,
    {
        self.inner.metadata.send_modify(|slot| {
            let next = updater(slot);
            *slot = next;
        });
    }

    /// Observe artifact changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Artifact>> {
        self.inner.artifact.subscribe()
    }

    /// Observe metadata changes
    #[must_use]
    pub fn subscribe_metadata(&self) -> watch::Receiver<Metadata> {
        self.inner.metadata.subscribe()
    }

    /// Return to absence (session end)
    pub fn clear(&self) {
        self.inner.artifact.send_replace(None);
        self.inner.metadata.send_replace(Metadata::Null);
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_artifact::ArtifactStatus;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn starts_absent() {
        let store = ArtifactStore::new();
        let (artifact, metadata) = store.get();
        assert!(artifact.is_none());
        assert_eq!(metadata, Metadata::Null);
        assert!(store.kind().is_none());
    }

    #[test]
    fn set_invokes_updater_once() {
        let store = ArtifactStore::new();
        let calls = Cell::new(0);

        let committed = store.set(|prev| {
            calls.set(calls.get() + 1);
            assert!(prev.is_none());
            Artifact::bootstrap()
        });

        assert_eq!(calls.get(), 1);
        assert_eq!(committed.status, ArtifactStatus::Streaming);
        assert_eq!(store.artifact(), Some(committed));
    }

    #[test]
    fn set_sees_previous_value() {
        let store = ArtifactStore::new();
        store.set(|_| Artifact {
            title: "a".to_string(),
            ..Artifact::default()
        });
        let next = store.set(|prev| {
            let mut next = prev.cloned().unwrap_or_default();
            next.title.push('b');
            next
        });
        assert_eq!(next.title, "ab");
    }

    #[test]
    fn metadata_replace_and_update() {
        let store = ArtifactStore::new();
        store.set_metadata(json!({"suggestions": []}));
        store.update_metadata(|prev| {
            let mut next = prev.clone();
            next["suggestions"] = json!(["s"]);
            next
        });
        assert_eq!(store.metadata(), json!({"suggestions": ["s"]}));
    }

    #[test]
    fn observers_are_notified() {
        let store = ArtifactStore::new();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.set(|_| Artifact::bootstrap());
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_some());
    }

    #[test]
    fn clones_share_state() {
        let store = ArtifactStore::new();
        let handle = store.clone();
        handle.set(|_| Artifact::bootstrap());
        assert!(store.artifact().is_some());
    }

    #[test]
    fn clear_returns_to_absence() {
        let store = ArtifactStore::new();
        store.set(|_| Artifact::bootstrap());
        store.set_metadata(json!({"k": 1}));
        store.clear();
        assert_eq!(store.get(), (None, Metadata::Null));
    }
}
