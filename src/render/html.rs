//! HTML renderer driven by [`RenderConfig`] templates.
//!
//! Every node renders into the `wrapper` template. Leaves fill it with
//! `input_wrapper` (label, input, help); nodes with children fill it with
//! their children's markup inside `group_wrapper`.
//!
//! Repeatable nodes get add/remove buttons. When the tree uses inline
//! suffixes, a repeatable node's block is emitted `inline_count` times with
//! the suffix index swapped in, followed by one hidden, index-free copy that
//! client-side code clones for new entries.

use serde_json::Value;

use super::template::{Context, Template};
use super::Renderer;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::naming::InlineIndex;
use crate::tree::{ElementId, FormTree};
use crate::view::ElementView;

/// Placeholder the wrapper template uses for the hidden-copy style.
const HIDDEN_SLOT: &str = "{hidden}";
const HIDDEN_STYLE: &str = r#"style="display: none;""#;
const NOT_EMPTY_MARKER: &str = r#"data-element-empty="0""#;
const EMPTY_MARKER: &str = r#"data-element-empty="1""#;

// ---------------------------------------------------------------------------
// RenderOptions
// ---------------------------------------------------------------------------

/// Per-render switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render visibility toggles and disabled inputs, including hidden fields.
    pub edit_mode: bool,
    /// Prefixed names left out of the output (unless in edit mode).
    pub hidden_fields: Vec<String>,
}

impl RenderOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable edit mode (builder).
    pub fn edit_mode(mut self, enabled: bool) -> Self {
        self.edit_mode = enabled;
        self
    }

    /// Hide a field by prefixed name (builder).
    pub fn hide(mut self, prefixed_name: impl Into<String>) -> Self {
        self.hidden_fields.push(prefixed_name.into());
        self
    }

    fn is_hidden(&self, prefixed_name: &str) -> bool {
        self.hidden_fields.iter().any(|f| f == prefixed_name)
    }
}

// ---------------------------------------------------------------------------
// HtmlRenderer
// ---------------------------------------------------------------------------

struct Templates {
    label: Template,
    input: Template,
    input_wrapper: Template,
    wrapper: Template,
    group_wrapper: Template,
    help: Template,
    edit_checkbox: Template,
    inline_add: Template,
    inline_remove: Template,
    inline_buttons: Template,
}

/// Renders a form tree to HTML.
pub struct HtmlRenderer {
    templates: Templates,
    is_checkbox: bool,
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Compile the templates in `config`.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            is_checkbox: config.input.contains(r#"type="checkbox""#),
            templates: Templates {
                label: Template::compile(&config.label),
                input: Template::compile(&config.input),
                input_wrapper: Template::compile(&config.input_wrapper),
                wrapper: Template::compile(&config.wrapper),
                group_wrapper: Template::compile(&config.group_wrapper),
                help: Template::compile(&config.help),
                edit_checkbox: Template::compile(&config.edit_checkbox),
                inline_add: Template::compile(&config.inline_add),
                inline_remove: Template::compile(&config.inline_remove),
                inline_buttons: Template::compile(&config.inline_buttons),
            },
            options: RenderOptions::default(),
        }
    }

    /// Use the given render options (builder).
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    fn render_node(&self, tree: &FormTree, id: ElementId) -> Result<String> {
        let view = tree.view(id)?;
        let hidden = self.options.is_hidden(&view.prefixed_name);
        if hidden && !self.options.edit_mode {
            return Ok(String::new());
        }

        let content = if view.children.is_empty() {
            self.render_leaf(&view)
        } else {
            let mut inner = String::new();
            for &child in view.children {
                inner.push_str(&self.render_node(tree, child)?);
            }
            if inner.is_empty() {
                inner
            } else {
                self.templates.group_wrapper.render(
                    &Context::new()
                        .text("parent_name", view.name)
                        .text("parent_label", view.label_text)
                        .raw("content", inner),
                )
            }
        };

        let mut context = Context::new();
        for (key, value) in view.metadata {
            if let Some(text) = scalar_text(value) {
                context = context.text(key.as_str(), &text);
            }
        }
        let context = context
            .text("prefixed_name", &view.prefixed_name)
            .text("name", view.name)
            .raw("content", content)
            .raw("edit_checkbox", self.edit_checkbox(&view.prefixed_name, hidden))
            .raw("inline_buttons", self.inline_buttons(&view));
        let block = self.templates.wrapper.render(&context);

        match view.inline_count {
            Some(count) if tree.config().inline_suffixes => {
                self.multiply_inline(tree, id, &block, count)
            }
            _ => Ok(block.replace(HIDDEN_SLOT, "")),
        }
    }

    fn render_leaf(&self, view: &ElementView<'_>) -> String {
        let value = scalar_text(view.initial_value).unwrap_or_default();
        let checked = self.is_checkbox && is_truthy(view.initial_value);

        let label = self.templates.label.render(
            &Context::new()
                .text("name", &view.prefixed_name)
                .text("label_text", view.label_text)
                .text("required", if view.required { "required" } else { "" }),
        );
        let input = self.templates.input.render(
            &Context::new()
                .text("name", &view.prefixed_name)
                .text("value", &value)
                .raw("checked", if checked { " checked" } else { "" })
                .raw("disabled", if self.options.edit_mode { " disabled" } else { "" }),
        );
        let help = if view.help_text.is_empty() {
            String::new()
        } else {
            self.templates
                .help
                .render(&Context::new().text("help_text", view.help_text))
        };

        self.templates.input_wrapper.render(
            &Context::new()
                .text("name", &view.prefixed_name)
                .raw("label", label)
                .raw("html_input", input)
                .raw("help_text", help),
        )
    }

    fn edit_checkbox(&self, prefixed_name: &str, hidden: bool) -> String {
        if !self.options.edit_mode {
            return String::new();
        }
        self.templates.edit_checkbox.render(
            &Context::new()
                .text("name", prefixed_name)
                .raw("checked", if hidden { " checked" } else { "" }),
        )
    }

    fn inline_buttons(&self, view: &ElementView<'_>) -> String {
        if view.inline_count.is_none() {
            return String::new();
        }
        let name = Context::new().text("name", view.name);
        let buttons = self.templates.inline_remove.render(&name) + &self.templates.inline_add.render(&name);
        self.templates
            .inline_buttons
            .render(&Context::new().raw("buttons", buttons))
    }

    /// Emit `count` indexed copies of `block` plus the hidden template copy.
    fn multiply_inline(
        &self,
        tree: &FormTree,
        id: ElementId,
        block: &str,
        count: u32,
    ) -> Result<String> {
        let base = tree.inline_name(id, InlineIndex::At(0))?;
        let mut out = block.replace(HIDDEN_SLOT, "");
        for index in 1..count {
            let copy = block.replace(&base, &tree.inline_name(id, InlineIndex::At(index))?);
            out.push_str(&copy.replace(HIDDEN_SLOT, ""));
        }
        let empty = block
            .replace(&base, &tree.inline_name(id, InlineIndex::Empty)?)
            .replace(NOT_EMPTY_MARKER, EMPTY_MARKER)
            .replace(HIDDEN_SLOT, HIDDEN_STYLE);
        out.push_str(&empty);
        Ok(out)
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, tree: &FormTree, id: ElementId) -> Result<String> {
        self.render_node(tree, id)
    }
}

/// Display text for scalar values; `None` for null, arrays and objects.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
