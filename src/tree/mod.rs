//! Element arena: slotmap-backed form tree with name queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{ElementData, ElementId, UNBOUNDED};
pub use tree::FormTree;
