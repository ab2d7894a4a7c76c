//! Tree queries: by child name, by name anywhere, generic predicate matching.

use super::node::{ElementData, ElementId};
use super::tree::FormTree;

impl FormTree {
    /// Find the first child of `parent` with the given name.
    pub fn find_child(&self, parent: ElementId, name: &str) -> Option<ElementId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&id| self.get(id).is_some_and(|data| data.name == name))
    }

    /// Find all nodes with the given (unprefixed) name.
    ///
    /// Iterates the arena, so the order is insertion order rather than tree order.
    pub fn query_by_name(&self, name: &str) -> Vec<ElementId> {
        self.query_all(|data| data.name == name)
    }

    /// Find all nodes matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&ElementData) -> bool) -> Vec<ElementId> {
        self.nodes
            .iter()
            .filter(|(_, data)| predicate(data))
            .map(|(id, _)| id)
            .collect()
    }
}
