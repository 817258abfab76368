//! Artifact state
//!
//! Defines [`Artifact`], the single mutable "current subject" rendered by the
//! artifact pane, and its status and positioning types.

use crate::artifact_kind::ArtifactKind;
use serde::{Deserialize, Serialize};

/// Opaque per-kind metadata
///
/// The reducer never inspects it; only kind hooks read or write it.
pub type Metadata = serde_json::Value;

/// Streaming status of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    /// No stream in progress
    #[default]
    Idle,
    /// Deltas are still arriving
    Streaming,
}

impl ArtifactStatus {
    /// Check if a stream is in progress
    #[inline]
    #[must_use]
    pub fn is_streaming(self) -> bool {
        matches!(self, Self::Streaming)
    }
}

/// Screen rectangle the artifact pane animates from
///
/// Owned by the UI; the reducer carries it through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top offset in pixels
    pub top: f64,
    /// Left offset in pixels
    pub left: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

/// The current artifact
///
/// # Invariants
/// - `status` is [`ArtifactStatus::Streaming`] from the first delta of a
///   stream until a finish delta sets it [`ArtifactStatus::Idle`]
/// - `kind` is [`ArtifactKind::Text`] until a kind delta changes it
/// - Absence of an artifact is modelled as `Option::<Artifact>::None`, which
///   is distinct from `Artifact::default()`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Persistent document id, once the stream has identified it
    pub document_id: Option<String>,

    /// Display title
    pub title: String,

    /// Artifact kind, selects the delta hook
    pub kind: ArtifactKind,

    /// Rendered content (text, source, base64 image, CSV)
    pub content: String,

    /// Streaming status
    pub status: ArtifactStatus,

    /// Whether the pane is open
    pub is_visible: bool,

    /// Pane origin rectangle
    pub bounding_box: BoundingBox,
}

impl Artifact {
    /// Artifact created by the first delta of a stream
    ///
    /// All fields at their defaults, status [`ArtifactStatus::Streaming`].
    #[inline]
    #[must_use]
    pub fn bootstrap() -> Self {
        Self {
            status: ArtifactStatus::Streaming,
            ..Self::default()
        }
    }

    /// Copy with status set to streaming
    #[inline]
    #[must_use]
    pub fn streaming(mut self) -> Self {
        self.status = ArtifactStatus::Streaming;
        self
    }

    /// Check if a stream is in progress
    #[inline]
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.status.is_streaming()
    }
}

/// Errors related to artifact values and delta payloads
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactError {
    /// Kind identifier not registered
    #[error("unknown artifact kind: {0}")]
    UnknownKind(String),

    /// Delta payload does not have the shape its tag requires
    #[error("invalid payload for '{kind}': {reason}")]
    InvalidPayload {
        /// Delta tag
        kind: String,
        /// What was wrong
        reason: String,
    },
}
