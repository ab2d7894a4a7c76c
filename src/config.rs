//! Tree and rendering configuration.
//!
//! Both structs are plain values passed at construction time. Nothing here is
//! global: two trees (or two renderers) can use different connectors or
//! templates side by side.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// TreeConfig
// ---------------------------------------------------------------------------

/// Naming and requiredness policy for a [`FormTree`](crate::tree::FormTree).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// String placed between ancestor names in prefixed names.
    pub connector: String,
    /// Inject `_#{name:0}` suffixes for repeatable nodes in prefixed names.
    pub inline_suffixes: bool,
    /// Treat a parent whose name contains `"choice"` as a choice group.
    pub choice_by_name: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            connector: "__".to_owned(),
            inline_suffixes: false,
            choice_by_name: false,
        }
    }
}

impl TreeConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting connector (builder).
    pub fn with_connector(mut self, connector: impl Into<String>) -> Self {
        self.connector = connector.into();
        self
    }

    /// Enable or disable inline-index suffixes (builder).
    pub fn with_inline_suffixes(mut self, enabled: bool) -> Self {
        self.inline_suffixes = enabled;
        self
    }

    /// Enable or disable name-based choice detection (builder).
    pub fn with_choice_by_name(mut self, enabled: bool) -> Self {
        self.choice_by_name = enabled;
        self
    }
}

// ---------------------------------------------------------------------------
// RenderConfig
// ---------------------------------------------------------------------------

/// HTML templates used by [`HtmlRenderer`](crate::render::HtmlRenderer).
///
/// Templates use `{placeholder}` syntax. See the renderer docs for the
/// placeholders each template receives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// `<label>` for a leaf: `name`, `label_text`, `required`.
    pub label: String,
    /// The input control: `name`, `value`, `checked`, `disabled`.
    pub input: String,
    /// Leaf body: `name`, `label`, `html_input`, `help_text`.
    pub input_wrapper: String,
    /// Outer block for every node: `prefixed_name`, `name`, `content`,
    /// `edit_checkbox`, `inline_buttons`, plus metadata keys.
    pub wrapper: String,
    /// Body of a node with children: `parent_name`, `parent_label`, `content`.
    pub group_wrapper: String,
    /// Help paragraph: `help_text`.
    pub help: String,
    /// Edit-mode visibility toggle: `name`, `checked`.
    pub edit_checkbox: String,
    /// Button adding an inline copy: `name`.
    pub inline_add: String,
    /// Button removing an inline copy: `name`.
    pub inline_remove: String,
    /// Container for the inline buttons: `buttons`.
    pub inline_buttons: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            label: r#"<label for="{name}" class="{required}">{label_text}</label>"#.to_owned(),
            input: r#"<input id="{name}" name="{name}" value="{value}"{checked}{disabled}/>"#
                .to_owned(),
            input_wrapper: "{label}{html_input}{help_text}".to_owned(),
            wrapper: concat!(
                r#"<div data-element="{prefixed_name}" data-element-empty="0" {hidden}>"#,
                r#"{edit_checkbox}{content}<span class="error"></span>{inline_buttons}</div>"#,
            )
            .to_owned(),
            group_wrapper: r#"<div class="element-group"><h5>{parent_label}</h5>{content}</div>"#
                .to_owned(),
            help: r#"<p class="help">{help_text}</p>"#.to_owned(),
            edit_checkbox: r#"<input type="checkbox" class="edit-toggle" name="{name}"{checked}/>"#
                .to_owned(),
            inline_add: r#"<button type="button" data-inline-add="{name}">+</button>"#.to_owned(),
            inline_remove: r#"<button type="button" data-inline-remove="{name}">-</button>"#
                .to_owned(),
            inline_buttons: r#"<div class="inline-buttons">{buttons}</div>"#.to_owned(),
        }
    }
}

impl RenderConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the label template (builder).
    pub fn with_label(mut self, template: impl Into<String>) -> Self {
        self.label = template.into();
        self
    }

    /// Replace the input template (builder).
    pub fn with_input(mut self, template: impl Into<String>) -> Self {
        self.input = template.into();
        self
    }

    /// Replace the leaf body template (builder).
    pub fn with_input_wrapper(mut self, template: impl Into<String>) -> Self {
        self.input_wrapper = template.into();
        self
    }

    /// Replace the outer wrapper template (builder).
    pub fn with_wrapper(mut self, template: impl Into<String>) -> Self {
        self.wrapper = template.into();
        self
    }

    /// Replace the group wrapper template (builder).
    pub fn with_group_wrapper(mut self, template: impl Into<String>) -> Self {
        self.group_wrapper = template.into();
        self
    }

    /// Replace the help template (builder).
    pub fn with_help(mut self, template: impl Into<String>) -> Self {
        self.help = template.into();
        self
    }
}
