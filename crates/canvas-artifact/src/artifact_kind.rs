//! Artifact kinds
//!
//! Defines [`ArtifactKind`], the variant tag that selects per-kind delta
//! handling in the stream reducer.

use crate::artifact::ArtifactError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of artifact shown in the artifact pane
///
/// The wire identifier is the lowercase variant name (`"text"`, `"code"`,
/// `"image"`, `"sheet"`). [`ArtifactKind::Text`] is the default kind of a
/// freshly bootstrapped artifact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Prose document
    #[default]
    Text,
    /// Source code snippet
    Code,
    /// Base64-encoded image
    Image,
    /// CSV spreadsheet
    Sheet,
}

impl ArtifactKind {
    /// All known kinds, in registration order
    pub const ALL: [ArtifactKind; 4] = [Self::Text, Self::Code, Self::Image, Self::Sheet];

    /// Wire identifier
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Code => "code",
            Self::Image => "image",
            Self::Sheet => "sheet",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = ArtifactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ArtifactError::UnknownKind(s.to_string()))
    }
}
