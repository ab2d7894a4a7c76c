//! Snapshot rendering helpers.
//!
//! Functions for converting a form tree or an error map into plain-text
//! strings suitable for snapshot testing and assertions.

use crate::error::{ErrorMap, Result};
use crate::tree::{ElementId, FormTree};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Dump the subtree rooted at `id`, one node per line.
///
/// Each line is the node's name prefixed by `--` per nesting level and
/// followed by its occurrence bounds when they differ from `1..1`. Lines are
/// separated by `'\n'` with no trailing newline.
///
/// # Examples
///
/// ```
/// use arbor_forms::testing::tree_to_string;
/// use arbor_forms::tree::{ElementData, FormTree};
///
/// let mut tree = FormTree::new();
/// let root = tree.insert(ElementData::new("form")).unwrap();
/// tree.insert_child(root, ElementData::new("email")).unwrap();
/// assert_eq!(tree_to_string(&tree, root).unwrap(), "form\n-- email");
/// ```
pub fn tree_to_string(tree: &FormTree, id: ElementId) -> Result<String> {
    let mut lines = Vec::new();
    write_node(tree, id, 0, &mut lines)?;
    Ok(lines.join("\n"))
}

/// Render an error map as `key: message` lines, keys in sorted order.
///
/// A key with several messages produces one line per message.
pub fn errors_to_string(errors: &ErrorMap) -> String {
    errors
        .iter()
        .flat_map(|(key, messages)| messages.iter().map(move |m| format!("{key}: {m}")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_node(tree: &FormTree, id: ElementId, level: usize, lines: &mut Vec<String>) -> Result<()> {
    let data = tree.node(id)?;
    let indent = if level == 0 {
        String::new()
    } else {
        format!("{} ", "--".repeat(level))
    };
    let mut line = format!("{indent}{}", data.name);
    if data.min_occurs != 1 || data.max_occurs != 1 {
        let max = if data.max_occurs == crate::tree::UNBOUNDED {
            "*".to_owned()
        } else {
            data.max_occurs.to_string()
        };
        line.push_str(&format!(" [{}..{max}]", data.min_occurs));
    }
    if data.choice {
        line.push_str(" (choice)");
    }
    lines.push(line);
    for &child in tree.children(id) {
        write_node(tree, child, level + 1, lines)?;
    }
    Ok(())
}
