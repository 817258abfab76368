//! Code kind
//!
//! Source code streams as cumulative snapshots: every `data-codeDelta`
//! carries the whole program so far.

use super::{edit_streaming, in_reveal_window};
use crate::hook::{DeltaHook, HookError};
use crate::registry::KindDefinition;
use crate::store::ArtifactStore;
use canvas_artifact::{ArtifactKind, Delta, DeltaKind};
use serde_json::json;

/// Content length window (exclusive, in chars) in which streaming code opens
/// the pane
pub const REVEAL_WINDOW: (usize, usize) = (300, 310);

/// Hook for [`ArtifactKind::Code`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeHook;

impl DeltaHook for CodeHook {
    fn on_delta(&self, delta: &Delta, store: &ArtifactStore) -> Result<(), HookError> {
        if delta.kind != DeltaKind::CodeDelta {
            return Ok(());
        }

        let source = delta.data_str()?;
        edit_streaming(store, |prev, next| {
            next.content = source.to_string();
            if in_reveal_window(prev, REVEAL_WINDOW) {
                next.is_visible = true;
            }
        });
        Ok(())
    }
}

/// Code kind definition
///
/// Metadata keeps the console outputs of executed snippets.
#[must_use]
pub fn definition() -> KindDefinition {
    KindDefinition::new(
        ArtifactKind::Code,
        "Useful for code generation; code execution is only available for python code.",
    )
    .with_initial_metadata(json!({ "outputs": [] }))
    .with_hook(CodeHook)
}
