//! Canvas Artifact Model
//!
//! The state an AI-chat artifact pane renders, and the typed delta events a
//! model/tool-call stream produces to build it.
//!
//! # Core Concepts
//!
//! - [`Artifact`]: The single "current artifact" (document, code, image, sheet)
//! - [`ArtifactKind`]: Variant tag selecting per-kind delta handling
//! - [`Delta`]: One typed `{type, data}` stream event
//! - [`transition`]: Generic state machine over the common artifact fields
//!
//! # Example
//!
//! ```rust
//! use canvas_artifact::{transition, ArtifactStatus, Delta};
//!
//! let artifact = transition(None, &Delta::title("Plan"));
//! assert_eq!(artifact.title, "Plan");
//! assert_eq!(artifact.status, ArtifactStatus::Streaming);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod artifact;
mod artifact_kind;
mod delta;
mod transition;

// Re-exports
pub use artifact::{Artifact, ArtifactError, ArtifactStatus, BoundingBox, Metadata};
pub use artifact_kind::ArtifactKind;
pub use delta::{Delta, DeltaKind};
pub use transition::{fold, transition};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
