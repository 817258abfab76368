//! Session configuration

use crate::error::SessionError;
use canvas_stream::StreamConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default owner for saved documents
pub const GUEST_USER: &str = "guest";

/// Configuration for one chat session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Owner recorded on saved documents
    pub user_id: String,
    /// Save the artifact whenever a stream finishes
    pub save_on_finish: bool,
    /// Reducer and registry settings
    pub stream: StreamConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_id: GUEST_USER.to_string(),
            save_on_finish: true,
            stream: StreamConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With document owner
    #[inline]
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// With save-on-finish toggled
    #[inline]
    #[must_use]
    pub fn with_save_on_finish(mut self, enabled: bool) -> Self {
        self.save_on_finish = enabled;
        self
    }

    /// With stream settings
    #[inline]
    #[must_use]
    pub fn with_stream(mut self, stream: StreamConfig) -> Self {
        self.stream = stream;
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConfigParse`] on malformed TOML or unknown
    /// kind names.
    pub fn from_toml_str(text: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConfigRead`] if the file cannot be read, or
    /// [`SessionError::ConfigParse`] if it is not valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
