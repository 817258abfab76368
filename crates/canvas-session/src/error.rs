//! Error types for Canvas sessions
//!
//! Provides error handling for:
//! - Session construction (reducer wiring)
//! - Configuration loading
//! - Document persistence

use canvas_stream::ReducerError;
use std::path::PathBuf;

/// Main session error type
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reducer could not be built
    #[error("reducer construction failed: {0}")]
    Reducer(#[from] ReducerError),

    /// Persistence call failed
    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration file could not be read
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration could not be parsed
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl SessionError {
    /// Check if the session can keep running after this error
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

/// Document persistence errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// No row with this id
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name
        entity: &'static str,
        /// Requested id
        id: String,
    },

    /// Record rejected before storage
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Backend failure
    #[error("storage error: {0}")]
    Storage(String),
}

impl PersistenceError {
    /// Stable `<type>:<surface>` error code
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found:database",
            Self::InvalidRecord(_) | Self::Storage(_) => "bad_request:database",
        }
    }
}
