//! Image kind

use super::edit_streaming;
use crate::hook::{DeltaHook, HookError};
use crate::registry::KindDefinition;
use crate::store::ArtifactStore;
use canvas_artifact::{ArtifactKind, Delta, DeltaKind};

/// Hook for [`ArtifactKind::Image`]
///
/// `data-imageDelta` replaces the content with the base64 payload and opens
/// the pane right away.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageHook;

impl DeltaHook for ImageHook {
    fn on_delta(&self, delta: &Delta, store: &ArtifactStore) -> Result<(), HookError> {
        if delta.kind != DeltaKind::ImageDelta {
            return Ok(());
        }

        let image = delta.data_str()?;
        edit_streaming(store, |_, next| {
            next.content = image.to_string();
            next.is_visible = true;
        });
        Ok(())
    }
}

/// Image kind definition
#[must_use]
pub fn definition() -> KindDefinition {
    KindDefinition::new(ArtifactKind::Image, "Create, edit and view images.").with_hook(ImageHook)
}
