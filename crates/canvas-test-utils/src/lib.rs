//! Testing utilities for Canvas workspace
//!
//! Shared test helpers, fixtures, and hooks.

#![allow(missing_docs)]

use canvas_artifact::{ArtifactKind, Delta, DeltaKind};
use canvas_stream::{
    ArtifactStore, DeltaBuffer, DeltaHook, HookError, KindDefinition, KindRegistry,
    StreamReducer,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Hook that records every delta it sees and optionally fails on one tag
#[derive(Debug, Clone, Default)]
pub struct RecordingHook {
    seen: Arc<Mutex<Vec<Delta>>>,
    fail_on: Option<DeltaKind>,
}

impl RecordingHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(kind: impl Into<DeltaKind>) -> Self {
        Self {
            seen: Arc::default(),
            fail_on: Some(kind.into()),
        }
    }

    pub fn seen(&self) -> Vec<Delta> {
        self.seen.lock().clone()
    }

    pub fn seen_kinds(&self) -> Vec<DeltaKind> {
        self.seen.lock().iter().map(|d| d.kind.clone()).collect()
    }
}

impl DeltaHook for RecordingHook {
    fn on_delta(&self, delta: &Delta, _store: &ArtifactStore) -> Result<(), HookError> {
        self.seen.lock().push(delta.clone());
        match &self.fail_on {
            Some(kind) if *kind == delta.kind => {
                Err(HookError::Failed(format!("refused {}", delta.kind)))
            }
            _ => Ok(()),
        }
    }
}

/// Registry where every kind is backed by its own recording hook
pub fn recording_registry() -> (KindRegistry, Vec<(ArtifactKind, RecordingHook)>) {
    let hooks: Vec<_> = ArtifactKind::ALL
        .into_iter()
        .map(|kind| (kind, RecordingHook::new()))
        .collect();
    let registry = hooks
        .iter()
        .fold(KindRegistry::builder(), |builder, (kind, hook)| {
            builder.register(KindDefinition::new(*kind, kind.as_str()).with_hook(hook.clone()))
        })
        .build();
    (registry, hooks)
}

/// Reducer over a fresh buffer and store
pub fn create_reducer(registry: KindRegistry) -> StreamReducer {
    StreamReducer::builder()
        .buffer(DeltaBuffer::new())
        .store(ArtifactStore::new())
        .registry(Arc::new(registry))
        .build()
        .unwrap()
}

/// Reducer with the built-in kinds
pub fn create_default_reducer() -> StreamReducer {
    create_reducer(KindRegistry::with_defaults())
}

/// The identify/title/clear/finish document stream
pub fn document_stream(id: &str, title: &str) -> Vec<Delta> {
    vec![
        Delta::id(id),
        Delta::title(title),
        Delta::clear(),
        Delta::finish(),
    ]
}

/// A full text document stream with body chunks
pub fn text_document_stream(id: &str, title: &str, chunks: &[&str]) -> Vec<Delta> {
    let mut deltas = vec![
        Delta::id(id),
        Delta::title(title),
        Delta::kind(ArtifactKind::Text),
        Delta::clear(),
    ];
    deltas.extend(chunks.iter().map(|c| Delta::text(*c)));
    deltas.push(Delta::finish());
    deltas
}

/// A code document stream sending cumulative source snapshots
pub fn code_document_stream(id: &str, title: &str, snapshots: &[&str]) -> Vec<Delta> {
    let mut deltas = vec![
        Delta::id(id),
        Delta::title(title),
        Delta::kind(ArtifactKind::Code),
        Delta::clear(),
    ];
    deltas.extend(snapshots.iter().map(|s| Delta::code(*s)));
    deltas.push(Delta::finish());
    deltas
}

/// Arbitrary delta with a JSON payload
pub fn raw_delta(tag: &str, data: serde_json::Value) -> Delta {
    Delta::new(tag, data)
}
