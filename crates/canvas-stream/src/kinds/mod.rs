//! Built-in artifact kinds
//!
//! Provides the delta hooks and definitions for the kinds the artifact pane
//! ships with:
//! - Text: appended prose chunks plus edit suggestions
//! - Code: cumulative source snapshots
//! - Image: base64 image payloads
//! - Sheet: cumulative CSV snapshots

pub mod code;
pub mod image;
pub mod sheet;
pub mod text;

// Re-export hooks
pub use code::CodeHook;
pub use image::ImageHook;
pub use sheet::SheetHook;
pub use text::TextHook;

use crate::registry::KindDefinition;
use crate::store::ArtifactStore;
use canvas_artifact::Artifact;

/// Definitions of every built-in kind, hooks attached
#[must_use]
pub fn builtin_definitions() -> Vec<KindDefinition> {
    vec![
        text::definition(),
        code::definition(),
        image::definition(),
        sheet::definition(),
    ]
}

/// Apply an in-place edit to the current artifact and mark it streaming
///
/// An absent artifact is bootstrapped first.
pub(crate) fn edit_streaming<F>(store: &ArtifactStore, edit: F)
where
    F: FnOnce(&Artifact, &mut Artifact),
{
    store.set(|prev| {
        let prev = prev.cloned().unwrap_or_else(Artifact::bootstrap);
        let mut next = prev.clone().streaming();
        edit(&prev, &mut next);
        next
    });
}

/// Check if a content length lies strictly inside a reveal window
#[inline]
pub(crate) fn in_reveal_window(prev: &Artifact, (low, high): (usize, usize)) -> bool {
    let len = prev.content.chars().count();
    prev.is_streaming() && len > low && len < high
}
