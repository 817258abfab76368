//! Canvas Stream
//!
//! Folds the delta stream of a model/tool-call connection into the current
//! artifact, exactly once per delta.
//!
//! # Core Concepts
//!
//! - [`DeltaBuffer`]: Append-only, order-preserving delta sequence
//! - [`ArtifactStore`]: Current artifact (or absence) plus opaque metadata
//! - [`KindRegistry`]: Immutable kind → hook/definition mapping
//! - [`StreamReducer`]: Cursor-tracking consumer; kind hook, then generic
//!   transition, for every new delta
//!
//! # Example
//!
//! ```rust
//! use canvas_artifact::{ArtifactStatus, Delta};
//! use canvas_stream::{ArtifactStore, DeltaBuffer, StreamReducer};
//!
//! let buffer = DeltaBuffer::new();
//! let store = ArtifactStore::new();
//! let mut reducer = StreamReducer::builder()
//!     .buffer(buffer.clone())
//!     .store(store.clone())
//!     .build()?;
//!
//! buffer.append(Delta::id("doc-1"));
//! buffer.append(Delta::title("Plan"));
//! buffer.append(Delta::finish());
//! reducer.process();
//!
//! let artifact = store.artifact().unwrap();
//! assert_eq!(artifact.title, "Plan");
//! assert_eq!(artifact.status, ArtifactStatus::Idle);
//! # Ok::<(), canvas_stream::ReducerError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod buffer;
mod config;
mod hook;
pub mod kinds;
mod reducer;
mod registry;
mod store;

// Re-exports
pub use buffer::DeltaBuffer;
pub use config::StreamConfig;
pub use hook::{DeltaHook, HookError};
pub use reducer::{Completion, HookFailure, ReduceReport, ReducerBuilder, ReducerError, StreamReducer};
pub use registry::{KindDefinition, KindRegistry, KindRegistryBuilder};
pub use store::ArtifactStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
