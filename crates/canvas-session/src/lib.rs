//! Canvas Session
//!
//! Wires the streaming reducer into a chat session: one buffer, store and
//! reducer per session, with finished artifacts saved as document versions.
//!
//! # Example
//!
//! ```rust
//! use canvas_artifact::Delta;
//! use canvas_session::{ChatSession, InMemoryDocumentRepository, SessionConfig};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let repository = Arc::new(InMemoryDocumentRepository::new());
//! let mut session = ChatSession::new(SessionConfig::default(), repository.clone())?;
//!
//! session.push(Delta::id("doc-1"));
//! session.push(Delta::title("Plan"));
//! session.push(Delta::text("Step one"));
//! session.push(Delta::finish());
//!
//! let outcome = session.pump().await?;
//! assert_eq!(outcome.saved, 1);
//! assert_eq!(repository.version_count(), 1);
//! # Ok::<(), canvas_session::SessionError>(())
//! # }).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod error;
mod persistence;
mod session;

// Re-exports
pub use config::{SessionConfig, GUEST_USER};
pub use error::{PersistenceError, SessionError};
pub use persistence::{DocumentRecord, DocumentRepository, InMemoryDocumentRepository};
pub use session::{ChatSession, PumpOutcome, SessionSummary};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
