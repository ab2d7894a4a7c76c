//! Node types: ElementId, ElementData.

use std::fmt;

use serde_json::{Map, Value};
use slotmap::new_key_type;

use crate::pipeline::{Processor, Validator};

new_key_type! {
    /// Unique identifier for a form element. Copy, lightweight (u64).
    pub struct ElementId;
}

/// `max_occurs` value standing for XSD `unbounded`.
pub const UNBOUNDED: u32 = u32::MAX;

static NULL: Value = Value::Null;

/// Data associated with a single form element.
///
/// Built with the `with_*` methods and handed to
/// [`FormTree::insert`](super::FormTree::insert) or
/// [`FormTree::insert_child`](super::FormTree::insert_child). Validation state
/// (`cleaned_value`, `errors`, the cleaned-data cache) is owned by the tree.
pub struct ElementData {
    /// Identifier, unique among siblings.
    pub name: String,
    /// Label shown by renderers. Empty means "use the name".
    pub label_text: String,
    /// Help paragraph shown by renderers.
    pub help_text: String,
    /// Minimum occurrences; `0` makes the element optional.
    pub min_occurs: u32,
    /// Maximum occurrences; `> 1` makes the element repeatable.
    pub max_occurs: u32,
    /// Marks a group whose children are alternatives (none is required).
    pub choice: bool,
    /// Externally supplied data, keyed by this element's name.
    pub initial_data: Map<String, Value>,
    /// Renderer-specific metadata, not interpreted by the core.
    pub metadata: Map<String, Value>,
    pub(crate) validators: Vec<Validator>,
    pub(crate) processors: Vec<Processor>,
    pub(crate) cleaned_value: Value,
    pub(crate) cleaned_cache: Option<Value>,
    pub(crate) errors: crate::error::ErrorMap,
}

impl ElementData {
    /// Create element data with the given name and default bounds `1..=1`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label_text: String::new(),
            help_text: String::new(),
            min_occurs: 1,
            max_occurs: 1,
            choice: false,
            initial_data: Map::new(),
            metadata: Map::new(),
            validators: Vec::new(),
            processors: Vec::new(),
            cleaned_value: Value::Null,
            cleaned_cache: None,
            errors: Default::default(),
        }
    }

    /// Set the label text (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label_text = label.into();
        self
    }

    /// Set the help text (builder).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help_text = help.into();
        self
    }

    /// Set both occurrence bounds (builder). Checked on insertion.
    pub fn with_occurs(mut self, min: u32, max: u32) -> Self {
        self.min_occurs = min;
        self.max_occurs = max;
        self
    }

    /// Set the minimum occurrences (builder).
    pub fn with_min_occurs(mut self, min: u32) -> Self {
        self.min_occurs = min;
        self
    }

    /// Set the maximum occurrences (builder).
    pub fn with_max_occurs(mut self, max: u32) -> Self {
        self.max_occurs = max;
        self
    }

    /// Shorthand for `min_occurs = 0`.
    pub fn optional(self) -> Self {
        self.with_min_occurs(0)
    }

    /// Mark as a choice group (builder).
    pub fn choice(mut self, choice: bool) -> Self {
        self.choice = choice;
        self
    }

    /// Set the initial value for this element (builder).
    ///
    /// Stored as `initial_data[name] = value`.
    pub fn with_initial(mut self, value: Value) -> Self {
        self.initial_data.insert(self.name.clone(), value);
        self
    }

    /// Replace the whole initial-data map (builder).
    pub fn with_initial_data(mut self, data: Map<String, Value>) -> Self {
        self.initial_data = data;
        self
    }

    /// Add one metadata entry (builder).
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Append a validator (builder).
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    /// Append a processor (builder).
    pub fn with_processor<F>(mut self, processor: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.processors.push(Box::new(processor));
        self
    }

    /// Label text, falling back to the name.
    pub fn label(&self) -> &str {
        if self.label_text.is_empty() {
            &self.name
        } else {
            &self.label_text
        }
    }

    /// The value at `initial_data[name]`, or `Null`.
    pub fn initial_value(&self) -> &Value {
        self.initial_data.get(&self.name).unwrap_or(&NULL)
    }

    /// Whether `max_occurs > 1`.
    pub fn is_repeatable(&self) -> bool {
        self.max_occurs > 1
    }

    /// Number of inline copies a renderer shows, or `None` when not repeatable.
    pub fn inline_count(&self) -> Option<u32> {
        self.is_repeatable().then(|| self.min_occurs.max(1))
    }

    /// Whether the bounds satisfy `max_occurs >= max(min_occurs, 1)`.
    pub(crate) fn occurs_valid(&self) -> bool {
        self.max_occurs >= 1 && self.max_occurs >= self.min_occurs
    }

    /// Drop all validation state.
    pub(crate) fn clear_state(&mut self) {
        self.cleaned_value = Value::Null;
        self.cleaned_cache = None;
        self.errors.clear();
    }
}

impl fmt::Debug for ElementData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementData")
            .field("name", &self.name)
            .field("min_occurs", &self.min_occurs)
            .field("max_occurs", &self.max_occurs)
            .field("choice", &self.choice)
            .field("validators", &self.validators.len())
            .field("processors", &self.processors.len())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
