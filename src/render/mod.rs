//! Rendering: renderer trait, HTML renderer, placeholder templates.

pub mod html;
pub mod template;

pub use html::{HtmlRenderer, RenderOptions};
pub use template::{escape_html, Context, Template};

use crate::error::{FormError, Result};
use crate::tree::{ElementId, FormTree};

/// Turns a (sub)tree into markup.
///
/// Implementations read nodes through [`FormTree::view`] and never mutate
/// the tree.
pub trait Renderer {
    /// Render the subtree rooted at `id`.
    fn render(&self, tree: &FormTree, id: ElementId) -> Result<String>;

    /// Render the whole tree from its root.
    fn render_root(&self, tree: &FormTree) -> Result<String> {
        let root = tree.root().ok_or(FormError::UnknownElement)?;
        self.render(tree, root)
    }
}
