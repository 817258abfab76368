//! Typed stream deltas
//!
//! Provides [`Delta`], one atomic update event of the artifact stream, and
//! [`DeltaKind`], its tag.

use crate::artifact::ArtifactError;
use crate::artifact_kind::ArtifactKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Delta tag
///
/// The first five variants are owned by the generic transition; the
/// kind-specific tags are only consumed by the matching kind hook. Unknown
/// tags are preserved as [`DeltaKind::Other`] so parsing never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeltaKind {
    /// Identify the persistent document (`data-id`)
    Id,
    /// Set the title (`data-title`)
    Title,
    /// Set the artifact kind (`data-kind`)
    Kind,
    /// Clear content (`data-clear`)
    Clear,
    /// End of stream (`data-finish`)
    Finish,
    /// Text chunk (`data-textDelta`)
    TextDelta,
    /// Cumulative source (`data-codeDelta`)
    CodeDelta,
    /// Image payload (`data-imageDelta`)
    ImageDelta,
    /// Cumulative CSV (`data-sheetDelta`)
    SheetDelta,
    /// Edit suggestion for a text document (`data-suggestion`)
    Suggestion,
    /// Any tag not listed above
    Other(String),
}

impl DeltaKind {
    /// Wire tag
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Id => "data-id",
            Self::Title => "data-title",
            Self::Kind => "data-kind",
            Self::Clear => "data-clear",
            Self::Finish => "data-finish",
            Self::TextDelta => "data-textDelta",
            Self::CodeDelta => "data-codeDelta",
            Self::ImageDelta => "data-imageDelta",
            Self::SheetDelta => "data-sheetDelta",
            Self::Suggestion => "data-suggestion",
            Self::Other(tag) => tag,
        }
    }

    /// Check if the generic transition owns this tag
    #[inline]
    #[must_use]
    pub fn is_generic(&self) -> bool {
        matches!(
            self,
            Self::Id | Self::Title | Self::Kind | Self::Clear | Self::Finish
        )
    }
}

impl From<&str> for DeltaKind {
    fn from(tag: &str) -> Self {
        match tag {
            "data-id" => Self::Id,
            "data-title" => Self::Title,
            "data-kind" => Self::Kind,
            "data-clear" => Self::Clear,
            "data-finish" => Self::Finish,
            "data-textDelta" => Self::TextDelta,
            "data-codeDelta" => Self::CodeDelta,
            "data-imageDelta" => Self::ImageDelta,
            "data-sheetDelta" => Self::SheetDelta,
            "data-suggestion" => Self::Suggestion,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for DeltaKind {
    fn from(tag: String) -> Self {
        match Self::from(tag.as_str()) {
            Self::Other(_) => Self::Other(tag),
            known => known,
        }
    }
}

impl From<DeltaKind> for String {
    fn from(kind: DeltaKind) -> Self {
        match kind {
            DeltaKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for DeltaKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for DeltaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One atomic update event of the artifact stream
///
/// Wire shape: `{"type": "<tag>", "data": <json>}`. A missing `data` field
/// deserializes as `null`.
///
/// # Invariants
/// - Immutable once appended to a stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    /// Delta tag
    #[serde(rename = "type")]
    pub kind: DeltaKind,

    /// Tag-specific payload
    #[serde(default)]
    pub data: Value,
}

impl Delta {
    /// Create delta from tag and payload
    #[inline]
    #[must_use]
    pub fn new(kind: impl Into<DeltaKind>, data: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            data: data.into(),
        }
    }

    /// `data-id` delta
    #[must_use]
    pub fn id(document_id: impl Into<String>) -> Self {
        Self::new(DeltaKind::Id, document_id.into())
    }

    /// `data-title` delta
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self::new(DeltaKind::Title, title.into())
    }

    /// `data-kind` delta
    #[must_use]
    pub fn kind(kind: ArtifactKind) -> Self {
        Self::new(DeltaKind::Kind, kind.as_str())
    }

    /// `data-clear` delta
    #[must_use]
    pub fn clear() -> Self {
        Self::new(DeltaKind::Clear, Value::Null)
    }

    /// `data-finish` delta
    #[must_use]
    pub fn finish() -> Self {
        Self::new(DeltaKind::Finish, Value::Null)
    }

    /// `data-textDelta` delta
    #[must_use]
    pub fn text(chunk: impl Into<String>) -> Self {
        Self::new(DeltaKind::TextDelta, chunk.into())
    }

    /// `data-codeDelta` delta
    #[must_use]
    pub fn code(source: impl Into<String>) -> Self {
        Self::new(DeltaKind::CodeDelta, source.into())
    }

    /// `data-imageDelta` delta
    #[must_use]
    pub fn image(base64: impl Into<String>) -> Self {
        Self::new(DeltaKind::ImageDelta, base64.into())
    }

    /// `data-sheetDelta` delta
    #[must_use]
    pub fn sheet(csv: impl Into<String>) -> Self {
        Self::new(DeltaKind::SheetDelta, csv.into())
    }

    /// Payload as a string
    ///
    /// # Errors
    /// Returns [`ArtifactError::InvalidPayload`] if the payload is not a JSON string
    pub fn data_str(&self) -> Result<&str, ArtifactError> {
        self.data.as_str().ok_or_else(|| self.invalid("expected a string"))
    }

    /// Payload as an artifact kind
    ///
    /// # Errors
    /// Returns error if the payload is not a string naming a known kind
    pub fn data_kind(&self) -> Result<ArtifactKind, ArtifactError> {
        self.data_str()?.parse()
    }

    /// Payload decoded into a kind-specific shape
    ///
    /// # Errors
    /// Returns [`ArtifactError::InvalidPayload`] if decoding fails
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, ArtifactError> {
        serde_json::from_value(self.data.clone()).map_err(|e| self.invalid(e.to_string()))
    }

    fn invalid(&self, reason: impl Into<String>) -> ArtifactError {
        ArtifactError::InvalidPayload {
            kind: self.kind.to_string(),
            reason: reason.into(),
        }
    }
}
