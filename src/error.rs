//! Crate error type and the field-error map.
//!
//! [`FormError`] covers programmer errors: bad occurrence bounds, stale ids,
//! cyclic attachment, serializing an unpopulated tree. Invalid user input is
//! never a `FormError`; it is collected into an [`ErrorMap`] by validation.

use std::collections::BTreeMap;

/// Field errors keyed by prefixed name, in insertion order per key.
pub type ErrorMap = BTreeMap<String, Vec<String>>;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors raised by tree construction, rendering and serialization.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Serialization was requested on a node without initial data.
    #[error("element '{name}' has no initial data to serialize")]
    ValueRequired { name: String },

    /// Occurrence bounds violate `max_occurs >= max(min_occurs, 1)`.
    #[error("invalid occurrence bounds for '{name}': min_occurs={min}, max_occurs={max}")]
    InvalidOccurs { name: String, min: u32, max: u32 },

    /// The id does not belong to this tree (removed or foreign).
    #[error("unknown element id")]
    UnknownElement,

    /// Attaching `child` under `parent` would make a node its own ancestor.
    #[error("cannot attach '{child}' under its own descendant '{parent}'")]
    Cycle { parent: String, child: String },

    /// A regex passed to a pattern validator failed to compile.
    #[error("invalid validator pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A serializer failed to produce output.
    #[error("serialization failed: {0}")]
    Serialize(String),
}
