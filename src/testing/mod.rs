//! Snapshot helpers.
//!
//! Use [`tree_to_string`] and [`errors_to_string`] to turn a tree or a
//! validation result into stable plain text for snapshot-style assertions.

pub mod snapshot;

pub use snapshot::{errors_to_string, tree_to_string};
