//! Declarative tree descriptions.
//!
//! A [`Schema`] is an owned, nested description of elements that
//! [`FormTree::mount`] turns into arena nodes in one go. With the `macros`
//! feature, `schema!` builds one from XML-like syntax.

use crate::error::Result;
use crate::tree::{ElementData, ElementId, FormTree};

/// One element plus its child descriptions.
#[derive(Debug)]
pub struct Schema {
    pub data: ElementData,
    pub children: Vec<Schema>,
}

impl Schema {
    pub fn new(data: ElementData) -> Self {
        Self {
            data,
            children: Vec::new(),
        }
    }

    /// Append a child description (builder).
    pub fn child(mut self, child: Schema) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child descriptions (builder).
    pub fn children(mut self, children: impl IntoIterator<Item = Schema>) -> Self {
        self.children.extend(children);
        self
    }
}

impl From<ElementData> for Schema {
    fn from(data: ElementData) -> Self {
        Self::new(data)
    }
}

impl FormTree {
    /// Insert `schema` under `parent` (or detached when `None`), children in
    /// declaration order. Returns the id of the schema's top element.
    pub fn mount(&mut self, parent: Option<ElementId>, schema: Schema) -> Result<ElementId> {
        let Schema { data, children } = schema;
        let id = match parent {
            Some(parent) => self.insert_child(parent, data)?,
            None => self.insert(data)?,
        };
        for child in children {
            self.mount(Some(id), child)?;
        }
        Ok(id)
    }
}
