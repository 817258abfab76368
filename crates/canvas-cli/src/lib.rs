//! Canvas command line support
//!
//! The `canvas` binary is a thin clap front end over [`replay`] and
//! [`kinds`].

#![warn(missing_docs)]

pub mod kinds;
pub mod replay;

pub use kinds::{list_kinds, KindInfo};
pub use replay::{read_deltas, replay, ReplayReport};
