//! Generic delta transition
//!
//! The kind-agnostic state machine over the common artifact fields. Kind
//! hooks run before it; it never fails.

use crate::artifact::{Artifact, ArtifactStatus};
use crate::delta::{Delta, DeltaKind};

/// Apply one delta to the previous artifact state
///
/// An absent artifact is bootstrapped to [`Artifact::bootstrap`] first,
/// whatever the delta's tag, and the delta's own effect is applied on top.
/// Tags the generic layer does not own, and payloads of the wrong shape,
/// leave the artifact unchanged.
#[must_use]
pub fn transition(prev: Option<&Artifact>, delta: &Delta) -> Artifact {
    let current = prev.cloned().unwrap_or_else(Artifact::bootstrap);
    apply(current, delta)
}

fn apply(artifact: Artifact, delta: &Delta) -> Artifact {
    match delta.kind {
        DeltaKind::Id => match delta.data_str() {
            Ok(id) => Artifact {
                document_id: Some(id.to_string()),
                ..artifact.streaming()
            },
            Err(e) => ignored(artifact, &e),
        },
        DeltaKind::Title => match delta.data_str() {
            Ok(title) => Artifact {
                title: title.to_string(),
                ..artifact.streaming()
            },
            Err(e) => ignored(artifact, &e),
        },
        DeltaKind::Kind => match delta.data_kind() {
            Ok(kind) => Artifact {
                kind,
                ..artifact.streaming()
            },
            Err(e) => ignored(artifact, &e),
        },
        DeltaKind::Clear => Artifact {
            content: String::new(),
            ..artifact.streaming()
        },
        DeltaKind::Finish => Artifact {
            status: ArtifactStatus::Idle,
            ..artifact
        },
        _ => artifact,
    }
}

fn ignored(artifact: Artifact, error: &crate::ArtifactError) -> Artifact {
    tracing::debug!(%error, "ignoring malformed delta payload");
    artifact
}

/// Left fold of [`transition`] over a delta sequence
///
/// The reference result for a stream with no kind hooks.
#[must_use]
pub fn fold<'a>(
    start: Option<Artifact>,
    deltas: impl IntoIterator<Item = &'a Delta>,
) -> Option<Artifact> {
    deltas
        .into_iter()
        .fold(start, |acc, delta| Some(transition(acc.as_ref(), delta)))
}
