//! Prefixed names: the connector-joined path from the root to a node.
//!
//! `form__person__first` is the prefixed name of `first` under `person` under
//! `form`. Names are recomputed on every call since nodes can be attached
//! after construction.
//!
//! With [`TreeConfig::inline_suffixes`](crate::config::TreeConfig) on, every
//! repeatable segment (self or ancestor) carries an inline-index suffix:
//! `phone` becomes `phone_#{phone:0}`. Renderers swap the index to produce
//! additional copies, or use the index-free `phone_#{phone}` form for the
//! hidden template copy.

use crate::error::Result;
use crate::tree::{ElementData, ElementId, FormTree};

/// Which inline-index suffix to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineIndex {
    /// `name_#{name:N}`
    At(u32),
    /// `name_#{name}`
    Empty,
}

/// Append an inline-index suffix to `name`.
pub fn with_inline_suffix(name: &str, index: InlineIndex) -> String {
    match index {
        InlineIndex::At(i) => format!("{name}_#{{{name}:{i}}}"),
        InlineIndex::Empty => format!("{name}_#{{{name}}}"),
    }
}

impl FormTree {
    /// The connector-joined path of ancestor names plus this node's name.
    ///
    /// A root (no parent) returns its own name.
    pub fn prefixed_name(&self, id: ElementId) -> Result<String> {
        let mut segments = vec![self.segment(self.node(id)?)];
        for ancestor in self.ancestors(id) {
            segments.push(self.segment(self.node(ancestor)?));
        }
        segments.reverse();
        Ok(segments.join(&self.config().connector))
    }

    /// This node's own segment with its suffix at `index` (regardless of
    /// configuration), as it appears inside prefixed names.
    pub fn inline_name(&self, id: ElementId, index: InlineIndex) -> Result<String> {
        Ok(with_inline_suffix(&self.node(id)?.name, index))
    }

    /// Find the node whose prefixed name equals `prefixed`.
    pub fn find_by_prefixed_name(&self, prefixed: &str) -> Option<ElementId> {
        let root = self.root()?;
        self.walk_depth_first(root)
            .into_iter()
            .find(|&id| self.prefixed_name(id).is_ok_and(|name| name == prefixed))
    }

    fn segment(&self, data: &ElementData) -> String {
        if self.config().inline_suffixes && data.is_repeatable() {
            with_inline_suffix(&data.name, InlineIndex::At(0))
        } else {
            data.name.clone()
        }
    }
}
