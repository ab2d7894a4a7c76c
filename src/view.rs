//! Read-only projection of a node for renderers.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::tree::{ElementId, FormTree};

/// Everything a renderer needs to know about one node.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementView<'a> {
    pub id: ElementId,
    pub name: &'a str,
    pub prefixed_name: String,
    pub label_text: &'a str,
    pub help_text: &'a str,
    pub initial_value: &'a Value,
    pub is_repeatable: bool,
    /// Number of inline copies to show when repeatable.
    pub inline_count: Option<u32>,
    pub required: bool,
    pub children: &'a [ElementId],
    pub metadata: &'a Map<String, Value>,
}

impl FormTree {
    /// Whether a renderer should mark `id` as required.
    ///
    /// `min_occurs > 0`, unless the direct parent is a choice group.
    pub fn is_required(&self, id: ElementId) -> Result<bool> {
        let data = self.node(id)?;
        if data.min_occurs == 0 {
            return Ok(false);
        }
        let Some(parent) = self.parent(id) else {
            return Ok(true);
        };
        let parent = self.node(parent)?;
        let in_choice =
            parent.choice || (self.config().choice_by_name && parent.name.contains("choice"));
        Ok(!in_choice)
    }

    /// Build the renderer view of `id`.
    pub fn view(&self, id: ElementId) -> Result<ElementView<'_>> {
        let data = self.node(id)?;
        Ok(ElementView {
            id,
            name: &data.name,
            prefixed_name: self.prefixed_name(id)?,
            label_text: data.label(),
            help_text: &data.help_text,
            initial_value: data.initial_value(),
            is_repeatable: data.is_repeatable(),
            inline_count: data.inline_count(),
            required: self.is_required(id)?,
            children: self.children(id),
            metadata: &data.metadata,
        })
    }
}
