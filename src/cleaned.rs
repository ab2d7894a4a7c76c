//! Cleaned data: the post-validation value tree.
//!
//! Leaves contribute their cleaned value; groups contribute a mapping from
//! child name to the child's cleaned data, in child order. The outermost call
//! wraps the result as `{name: ...}`. Results are memoized per node until the
//! next validation touches it, so call this only after `validate`.

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::Result;
use crate::tree::{ElementId, FormTree};

/// Whether a value counts as empty for memoization purposes.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

impl FormTree {
    /// Cleaned data for `id`, wrapped as `{name: data}`.
    pub fn cleaned_data(&mut self, id: ElementId) -> Result<Value> {
        let data = self.cleaned_inner(id)?;
        let mut wrapped = Map::new();
        wrapped.insert(self.node(id)?.name.clone(), data);
        Ok(Value::Object(wrapped))
    }

    fn cleaned_inner(&mut self, id: ElementId) -> Result<Value> {
        if let Some(cached) = &self.node(id)?.cleaned_cache {
            trace!(element = %self.nodes[id].name, "cleaned data cache hit");
            return Ok(cached.clone());
        }

        let children = self.children(id).to_vec();
        let data = if children.is_empty() {
            self.node(id)?.cleaned_value.clone()
        } else {
            let mut map = Map::new();
            for child in children {
                let value = self.cleaned_inner(child)?;
                map.insert(self.node(child)?.name.clone(), value);
            }
            Value::Object(map)
        };

        if !is_empty_value(&data) {
            self.node_mut(id)?.cleaned_cache = Some(data.clone());
        }
        Ok(data)
    }
}
