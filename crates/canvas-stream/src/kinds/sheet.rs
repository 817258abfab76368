//! Sheet kind

use super::edit_streaming;
use crate::hook::{DeltaHook, HookError};
use crate::registry::KindDefinition;
use crate::store::ArtifactStore;
use canvas_artifact::{ArtifactKind, Delta, DeltaKind};

/// Hook for [`ArtifactKind::Sheet`]
///
/// `data-sheetDelta` carries the whole CSV so far; it replaces the content
/// and opens the pane.
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetHook;

impl DeltaHook for SheetHook {
    fn on_delta(&self, delta: &Delta, store: &ArtifactStore) -> Result<(), HookError> {
        if delta.kind != DeltaKind::SheetDelta {
            return Ok(());
        }

        let csv = delta.data_str()?;
        edit_streaming(store, |_, next| {
            next.content = csv.to_string();
            next.is_visible = true;
        });
        Ok(())
    }
}

/// Sheet kind definition
#[must_use]
pub fn definition() -> KindDefinition {
    KindDefinition::new(
        ArtifactKind::Sheet,
        "Useful for working with spreadsheets.",
    )
    .with_hook(SheetHook)
}
