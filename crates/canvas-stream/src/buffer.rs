//! Delta stream buffer
//!
//! Provides [`DeltaBuffer`], the append-only, order-preserving delta sequence
//! shared by one producer (the model connection) and one consumer (the
//! reducer).

use canvas_artifact::Delta;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

/// Append-only delta sequence
///
/// Cloning yields another handle to the same sequence. Appends never
/// reorder, drop or mutate earlier entries, so readers may take snapshots
/// while a producer keeps appending.
///
/// Growth is published on a [`watch`] channel carrying the current length;
/// that channel is the reducer's trigger.
#[derive(Debug, Clone)]
pub struct DeltaBuffer {
    inner: Arc<BufferInner>,
}

#[derive(Debug)]
struct BufferInner {
    deltas: RwLock<Vec<Delta>>,
    len_tx: watch::Sender<usize>,
}

impl DeltaBuffer {
    /// Create empty buffer
    #[must_use]
    pub fn new() -> Self {
        let (len_tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(BufferInner {
                deltas: RwLock::new(Vec::new()),
                len_tx,
            }),
        }
    }

    /// Append one delta at the tail
    ///
    /// Returns the index the delta was stored at.
    pub fn append(&self, delta: Delta) -> usize {
        let mut guard = self.inner.deltas.write();
        guard.push(delta);
        let len = guard.len();
        // Published under the guard so the watched length never goes backwards
        self.inner.len_tx.send_replace(len);
        len - 1
    }

    /// Append several deltas, preserving their order
    pub fn extend(&self, deltas: impl IntoIterator<Item = Delta>) {
        let mut guard = self.inner.deltas.write();
        guard.extend(deltas);
        self.inner.len_tx.send_replace(guard.len());
    }

    /// Full ordered sequence observed so far
    #[must_use]
    pub fn snapshot(&self) -> Vec<Delta> {
        self.inner.deltas.read().clone()
    }

    /// Ordered suffix starting at `start`
    ///
    /// Empty if `start` is at or past the end.
    #[must_use]
    pub fn since(&self, start: usize) -> Vec<Delta> {
        let guard = self.inner.deltas.read();
        guard.get(start..).map(<[Delta]>::to_vec).unwrap_or_default()
    }

    /// Number of deltas appended so far
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.deltas.read().len()
    }

    /// Check if nothing has been appended
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to length changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.inner.len_tx.subscribe()
    }

    /// Drop all deltas (session boundary)
    ///
    /// Reducers reading this buffer must be reconstructed afterwards; their
    /// cursor does not follow a shrinking buffer.
    pub fn reset(&self) {
        let mut guard = self.inner.deltas.write();
        guard.clear();
        self.inner.len_tx.send_replace(0);
    }
}

impl Default for DeltaBuffer {
    fn default() -> Self {
        Self::new()
    }
}
