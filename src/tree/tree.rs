//! Tree operations: insert, attach, walk, initial-data propagation.

use serde_json::{Map, Value};
use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, warn};

use super::node::{ElementData, ElementId};
use crate::config::TreeConfig;
use crate::error::{FormError, Result};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[ElementId] = &[];

/// The form element tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps: a node's parent is an explicit `Option`, and its
/// children are an ordered list whose order drives rendering and naming.
pub struct FormTree {
    pub(crate) nodes: SlotMap<ElementId, ElementData>,
    children: SecondaryMap<ElementId, Vec<ElementId>>,
    parent: SecondaryMap<ElementId, ElementId>,
    root: Option<ElementId>,
    config: TreeConfig,
}

impl FormTree {
    /// Create an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create an empty tree with the given configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
            config,
        }
    }

    /// The tree configuration.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Insert a detached node (no parent).
    ///
    /// If no root has been set yet, this node becomes the root.
    pub fn insert(&mut self, data: ElementData) -> Result<ElementId> {
        if !data.occurs_valid() {
            return Err(FormError::InvalidOccurs {
                name: data.name,
                min: data.min_occurs,
                max: data.max_occurs,
            });
        }
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        Ok(id)
    }

    /// Insert a node as the last child of `parent`.
    ///
    /// When the parent's initial value is a non-empty object, the new node's
    /// initial data is seeded with the parent's entry for its name.
    pub fn insert_child(&mut self, parent: ElementId, data: ElementData) -> Result<ElementId> {
        self.node(parent)?;
        if !data.occurs_valid() {
            return Err(FormError::InvalidOccurs {
                name: data.name,
                min: data.min_occurs,
                max: data.max_occurs,
            });
        }
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.link(parent, id);
        Ok(id)
    }

    /// Append an existing node to `parent`'s children.
    ///
    /// A node attached elsewhere is moved. Attaching the same child to the
    /// same parent again appends a second entry; duplicates are not filtered.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        if parent == child || self.ancestors(parent).contains(&child) {
            return Err(FormError::Cycle {
                parent: self.nodes[parent].name.clone(),
                child: self.nodes[child].name.clone(),
            });
        }

        match self.parent.get(child).copied() {
            Some(old) if old == parent => {
                warn!(
                    parent = %self.nodes[parent].name,
                    child = %self.nodes[child].name,
                    "child attached to the same parent twice"
                );
            }
            Some(old) => {
                if let Some(siblings) = self.children.get_mut(old) {
                    siblings.retain(|&c| c != child);
                }
            }
            None => {}
        }
        if self.root == Some(child) {
            self.root = Some(parent);
        }
        self.link(parent, child);
        Ok(())
    }

    /// Set both sides of the parent/child link and seed initial data.
    fn link(&mut self, parent: ElementId, child: ElementId) {
        self.parent.insert(child, parent);
        if let Some(kids) = self.children.get_mut(parent) {
            kids.push(child);
        }

        let seed = match self.nodes[parent].initial_value() {
            Value::Object(map) if !map.is_empty() => {
                let key = &self.nodes[child].name;
                Some(map.get(key).cloned().unwrap_or(Value::Null))
            }
            _ => None,
        };
        let node = &mut self.nodes[child];
        if let Some(value) = seed {
            node.initial_data.insert(node.name.clone(), value);
        }
        debug!(parent = %self.nodes[parent].name, child = %self.nodes[child].name, "attached");
    }

    /// Replace a node's initial data and push it down the subtree.
    ///
    /// Each child receives this node's initial value (when it is an object)
    /// as its own initial-data map.
    pub fn set_initial_data(&mut self, id: ElementId, data: Map<String, Value>) -> Result<()> {
        let node = self.node_mut(id)?;
        let nested = match node.initial_data_after(data) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let propagate = !self.nodes[id].initial_data.is_empty();
        if propagate {
            for child in self.children(id).to_vec() {
                self.set_initial_data(child, nested.clone())?;
            }
        }
        Ok(())
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Child at `index` in insertion order.
    pub fn child(&self, id: ElementId, index: usize) -> Option<ElementId> {
        self.children(id).get(index).copied()
    }

    /// Walk from `id` up to the root, collecting ancestor ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: ElementId) -> Option<&ElementData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id)
    }

    pub(crate) fn node(&self, id: ElementId) -> Result<&ElementData> {
        self.nodes.get(id).ok_or(FormError::UnknownElement)
    }

    pub(crate) fn node_mut(&mut self, id: ElementId) -> Result<&mut ElementData> {
        self.nodes.get_mut(id).ok_or(FormError::UnknownElement)
    }

    /// The current root node, if set.
    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    /// Explicitly set the root node.
    pub fn set_root(&mut self, id: ElementId) {
        self.root = Some(id);
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the tree contains a node with the given id.
    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for FormTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementData {
    /// Install `data` and return a copy of the resulting initial value.
    fn initial_data_after(&mut self, data: Map<String, Value>) -> Option<Value> {
        self.initial_data = data;
        self.initial_data.get(&self.name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Build a small test tree:
    /// ```text
    ///       form
    ///      /    \
    ///  person    email
    ///   / \
    ///  first last
    /// ```
    fn build_tree() -> (FormTree, ElementId, ElementId, ElementId, ElementId, ElementId) {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        let person = tree.insert_child(form, ElementData::new("person")).unwrap();
        let email = tree.insert_child(form, ElementData::new("email")).unwrap();
        let first = tree.insert_child(person, ElementData::new("first")).unwrap();
        let last = tree.insert_child(person, ElementData::new("last")).unwrap();
        (tree, form, person, email, first, last)
    }

    #[test]
    fn insert_sets_root() {
        let mut tree = FormTree::new();
        let id = tree.insert(ElementData::new("form")).unwrap();
        assert_eq!(tree.root(), Some(id));
    }

    #[test]
    fn insert_second_does_not_change_root() {
        let mut tree = FormTree::new();
        let first = tree.insert(ElementData::new("a")).unwrap();
        let _second = tree.insert(ElementData::new("b")).unwrap();
        assert_eq!(tree.root(), Some(first));
    }

    #[test]
    fn insert_rejects_bad_occurs() {
        let mut tree = FormTree::new();
        let err = tree
            .insert(ElementData::new("x").with_occurs(2, 1))
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidOccurs { min: 2, max: 1, .. }));
        assert!(tree.is_empty());
    }

    #[test]
    fn insert_child_rejects_zero_max() {
        let mut tree = FormTree::new();
        let root = tree.insert(ElementData::new("r")).unwrap();
        let err = tree
            .insert_child(root, ElementData::new("x").with_occurs(0, 0))
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidOccurs { .. }));
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn parent_relationship() {
        let (tree, form, person, _email, first, _last) = build_tree();
        assert_eq!(tree.parent(person), Some(form));
        assert_eq!(tree.parent(first), Some(person));
        assert_eq!(tree.parent(form), None);
    }

    #[test]
    fn children_keep_insertion_order() {
        let (tree, form, person, email, first, last) = build_tree();
        assert_eq!(tree.children(form), &[person, email]);
        assert_eq!(tree.children(person), &[first, last]);
        assert!(tree.children(first).is_empty());
        assert_eq!(tree.child(form, 1), Some(email));
        assert_eq!(tree.child(form, 2), None);
    }

    #[test]
    fn ancestors() {
        let (tree, form, person, _email, first, _last) = build_tree();
        assert_eq!(tree.ancestors(first), vec![person, form]);
        assert!(tree.ancestors(form).is_empty());
    }

    #[test]
    fn add_child_links_both_sides() {
        let mut tree = FormTree::new();
        let root = tree.insert(ElementData::new("root")).unwrap();
        let loose = tree.insert(ElementData::new("loose")).unwrap();
        assert_eq!(tree.parent(loose), None);

        tree.add_child(root, loose).unwrap();
        assert_eq!(tree.parent(loose), Some(root));
        assert_eq!(tree.children(root), &[loose]);
    }

    #[test]
    fn add_child_twice_appends_duplicate() {
        let mut tree = FormTree::new();
        let root = tree.insert(ElementData::new("root")).unwrap();
        let leaf = tree.insert(ElementData::new("leaf")).unwrap();
        tree.add_child(root, leaf).unwrap();
        tree.add_child(root, leaf).unwrap();
        assert_eq!(tree.children(root), &[leaf, leaf]);
    }

    #[test]
    fn add_child_moves_from_old_parent() {
        let (mut tree, form, person, email, first, _last) = build_tree();
        tree.add_child(form, first).unwrap();
        assert_eq!(tree.parent(first), Some(form));
        assert!(!tree.children(person).contains(&first));
        assert_eq!(tree.children(form), &[person, email, first]);
    }

    #[test]
    fn add_child_rejects_cycles() {
        let (mut tree, form, person, _email, first, _last) = build_tree();
        assert!(matches!(
            tree.add_child(first, person),
            Err(FormError::Cycle { .. })
        ));
        assert!(matches!(
            tree.add_child(form, form),
            Err(FormError::Cycle { .. })
        ));
    }

    #[test]
    fn attaching_root_under_new_parent_moves_root() {
        let mut tree = FormTree::new();
        let inner = tree.insert(ElementData::new("inner")).unwrap();
        let outer = tree.insert(ElementData::new("outer")).unwrap();
        assert_eq!(tree.root(), Some(inner));
        tree.add_child(outer, inner).unwrap();
        assert_eq!(tree.root(), Some(outer));
    }

    #[test]
    fn insert_child_seeds_initial_data_from_parent() {
        let mut tree = FormTree::new();
        let form = tree
            .insert(ElementData::new("form").with_initial(json!({"email": "a@b.c"})))
            .unwrap();
        let email = tree.insert_child(form, ElementData::new("email")).unwrap();
        let phone = tree.insert_child(form, ElementData::new("phone")).unwrap();
        assert_eq!(tree.get(email).unwrap().initial_value(), &json!("a@b.c"));
        assert_eq!(tree.get(phone).unwrap().initial_data.get("phone"), Some(&Value::Null));
    }

    #[test]
    fn no_seed_without_parent_initial_data() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        let email = tree.insert_child(form, ElementData::new("email")).unwrap();
        assert!(tree.get(email).unwrap().initial_data.is_empty());
    }

    #[test]
    fn set_initial_data_propagates() {
        let (mut tree, form, person, email, first, _last) = build_tree();
        let mut data = Map::new();
        data.insert(
            "form".into(),
            json!({"person": {"first": "Ada"}, "email": "ada@example.com"}),
        );
        tree.set_initial_data(form, data).unwrap();
        assert_eq!(tree.get(email).unwrap().initial_value(), &json!("ada@example.com"));
        assert_eq!(tree.get(person).unwrap().initial_value(), &json!({"first": "Ada"}));
        assert_eq!(tree.get(first).unwrap().initial_value(), &json!("Ada"));
    }

    #[test]
    fn walk_depth_first() {
        let (tree, form, person, email, first, last) = build_tree();
        assert_eq!(tree.walk_depth_first(form), vec![form, person, first, last, email]);
        assert_eq!(tree.walk_depth_first(person), vec![person, first, last]);
    }

    #[test]
    fn len_and_contains() {
        let (tree, form, ..) = build_tree();
        assert_eq!(tree.len(), 5);
        assert!(tree.contains(form));
        assert!(FormTree::default().is_empty());
    }

    #[test]
    fn set_root() {
        let (mut tree, _form, person, ..) = build_tree();
        tree.set_root(person);
        assert_eq!(tree.root(), Some(person));
    }
}
