//! Text kind
//!
//! Prose documents stream as appended chunks. The pane opens once the
//! document grows past a few paragraphs, and edit suggestions accumulate in
//! the metadata.

use super::{edit_streaming, in_reveal_window};
use crate::hook::{DeltaHook, HookError};
use crate::registry::KindDefinition;
use crate::store::ArtifactStore;
use canvas_artifact::{ArtifactKind, Delta, DeltaKind, Metadata};
use serde_json::{json, Value};

/// Content length window (exclusive, in chars) in which a streaming text
/// document opens the pane
pub const REVEAL_WINDOW: (usize, usize) = (400, 450);

/// Metadata key holding the suggestion list
pub const SUGGESTIONS_KEY: &str = "suggestions";

/// Hook for [`ArtifactKind::Text`]
///
/// - `data-textDelta`: append the chunk to the content
/// - `data-suggestion`: push the payload onto `metadata.suggestions`
#[derive(Debug, Clone, Copy, Default)]
pub struct TextHook;

impl DeltaHook for TextHook {
    fn on_delta(&self, delta: &Delta, store: &ArtifactStore) -> Result<(), HookError> {
        match delta.kind {
            DeltaKind::TextDelta => {
                let chunk = delta.data_str()?;
                edit_streaming(store, |prev, next| {
                    next.content.push_str(chunk);
                    if in_reveal_window(prev, REVEAL_WINDOW) {
                        next.is_visible = true;
                    }
                });
                Ok(())
            }
            DeltaKind::Suggestion => push_suggestion(store, delta.data.clone()),
            _ => Ok(()),
        }
    }
}

fn push_suggestion(store: &ArtifactStore, suggestion: Value) -> Result<(), HookError> {
    let mut metadata = store.metadata();
    if metadata.is_null() {
        metadata = json!({ SUGGESTIONS_KEY: [] });
    }

    let Metadata::Object(map) = &mut metadata else {
        return Err(HookError::InvalidMetadata(
            "expected an object".to_string(),
        ));
    };
    match map
        .entry(SUGGESTIONS_KEY)
        .or_insert_with(|| Value::Array(Vec::new()))
    {
        Value::Array(list) => list.push(suggestion),
        other => {
            return Err(HookError::InvalidMetadata(format!(
                "'{SUGGESTIONS_KEY}' is not an array: {other}"
            )))
        }
    }

    store.set_metadata(metadata);
    Ok(())
}

/// Text kind definition
#[must_use]
pub fn definition() -> KindDefinition {
    KindDefinition::new(
        ArtifactKind::Text,
        "Useful for text content, like drafting essays and emails.",
    )
    .with_initial_metadata(json!({ SUGGESTIONS_KEY: [] }))
    .with_hook(TextHook)
}
