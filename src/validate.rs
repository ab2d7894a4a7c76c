//! Validation: collect every field error in one depth-first pass.
//!
//! Each node reads its own value out of the mapping its parent sees. A parent
//! checks requiredness for its children before descending, so a missing
//! required subtree is reported once under the child's prefixed name and not
//! traversed. Validator rejections accumulate under the node's own prefixed
//! name. Nothing stops traversal; the caller gets every error at once.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{ErrorMap, FormError, Result};
use crate::pipeline::collect_rejections;
use crate::tree::{ElementId, FormTree};

/// Message recorded for a missing required child.
pub const REQUIRED_MESSAGE: &str = "This field is required";

impl FormTree {
    /// Validate `id` against `data`, the mapping its parent sees.
    ///
    /// The node's value is `data[name]`; when absent, a node with children
    /// uses an empty object and a leaf uses `null`. Overwrites the cleaned
    /// value and errors of every node visited, and drops their cleaned-data
    /// caches.
    pub fn validate(&mut self, id: ElementId, data: &Value) -> Result<ErrorMap> {
        let name = self.node(id)?.name.clone();
        let value = match data.get(name.as_str()) {
            Some(value) => value.clone(),
            None if !self.children(id).is_empty() => Value::Object(Map::new()),
            None => Value::Null,
        };

        let mut errors = ErrorMap::new();
        for sub in self.children(id).to_vec() {
            let sub_name = self.node(sub)?.name.clone();
            let raw = value.get(sub_name.as_str()).cloned().unwrap_or(Value::Null);
            let processed = self.process_value(sub, raw)?;

            if processed.is_null() && self.node(sub)?.min_occurs > 0 {
                let key = self.prefixed_name(sub)?;
                trace!(field = %key, "required value missing");
                self.reset(sub)?;
                errors.insert(key, vec![REQUIRED_MESSAGE.to_owned()]);
            } else {
                errors.extend(self.validate(sub, &value)?);
            }
        }

        let processed = self.process_value(id, value)?;
        let key = self.prefixed_name(id)?;
        let rejections = collect_rejections(&self.node(id)?.validators, &processed);
        if !rejections.is_empty() {
            errors.entry(key.clone()).or_default().extend(rejections);
        }

        let node = self.node_mut(id)?;
        node.cleaned_value = processed;
        node.cleaned_cache = None;
        node.errors = errors.clone();
        debug!(element = %key, errors = errors.len(), "validated");
        Ok(errors)
    }

    /// Validate the root against a whole submission.
    ///
    /// Equivalent to `validate(root, {root_name: submission})`.
    pub fn validate_submission(&mut self, submission: Value) -> Result<ErrorMap> {
        let root = self.root().ok_or(FormError::UnknownElement)?;
        let mut wrapper = Map::new();
        wrapper.insert(self.node(root)?.name.clone(), submission);
        self.validate(root, &Value::Object(wrapper))
    }

    /// Errors recorded for `id` (and its subtree) by the last validation.
    pub fn errors(&self, id: ElementId) -> Result<&ErrorMap> {
        Ok(&self.node(id)?.errors)
    }

    /// Whether the last validation of `id` recorded no errors.
    pub fn is_valid(&self, id: ElementId) -> Result<bool> {
        Ok(self.node(id)?.errors.is_empty())
    }

    /// The processed value stored by the last validation.
    pub fn cleaned_value(&self, id: ElementId) -> Result<&Value> {
        Ok(&self.node(id)?.cleaned_value)
    }

    /// Clear cleaned values, errors and cleaned-data caches in a subtree.
    pub fn reset(&mut self, id: ElementId) -> Result<()> {
        self.node(id)?;
        for node in self.walk_depth_first(id) {
            self.node_mut(node)?.clear_state();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementData;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn reject_empty(v: &Value) -> Option<String> {
        (v == &json!("")).then(|| "invalid".to_owned())
    }

    #[test]
    fn missing_required_child_reported_under_child_name() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        tree.insert_child(form, ElementData::new("name")).unwrap();

        let errors = tree.validate(form, &json!({"form": {}})).unwrap();
        assert_eq!(
            errors,
            ErrorMap::from([("form__name".to_owned(), vec![REQUIRED_MESSAGE.to_owned()])])
        );
    }

    #[test]
    fn present_but_invalid_is_a_validator_error() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        tree.insert_child(form, ElementData::new("email").with_validator(reject_empty))
            .unwrap();

        let errors = tree.validate(form, &json!({"form": {"email": ""}})).unwrap();
        assert_eq!(
            errors,
            ErrorMap::from([("form__email".to_owned(), vec!["invalid".to_owned()])])
        );
    }

    #[test]
    fn optional_missing_child_is_validated_without_error() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        let nick = tree
            .insert_child(form, ElementData::new("nick").optional())
            .unwrap();

        let errors = tree.validate(form, &json!({"form": {}})).unwrap();
        assert!(errors.is_empty());
        assert_eq!(tree.cleaned_value(nick).unwrap(), &Value::Null);
    }

    #[test]
    fn validator_messages_accumulate_in_order() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        tree.insert_child(
            form,
            ElementData::new("code")
                .with_validator(|_| Some("first".into()))
                .with_validator(|_| Some("second".into())),
        )
        .unwrap();

        let errors = tree.validate(form, &json!({"form": {"code": "x"}})).unwrap();
        assert_eq!(errors["form__code"], vec!["first", "second"]);
    }

    #[test]
    fn processors_run_before_required_check() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        tree.insert_child(
            form,
            ElementData::new("name").with_processor(|v| match v {
                Value::String(s) if s.trim().is_empty() => Value::Null,
                other => other,
            }),
        )
        .unwrap();

        let errors = tree.validate(form, &json!({"form": {"name": "   "}})).unwrap();
        assert_eq!(errors["form__name"], vec![REQUIRED_MESSAGE]);
    }

    #[test]
    fn nested_errors_merge_upward() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        let person = tree.insert_child(form, ElementData::new("person")).unwrap();
        tree.insert_child(person, ElementData::new("first")).unwrap();
        tree.insert_child(person, ElementData::new("last").with_validator(reject_empty))
            .unwrap();

        let errors = tree
            .validate(form, &json!({"form": {"person": {"last": ""}}}))
            .unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["form__person__first"], vec![REQUIRED_MESSAGE]);
        assert_eq!(errors["form__person__last"], vec!["invalid"]);
        assert_eq!(tree.errors(person).unwrap(), &errors);
    }

    #[test]
    fn second_pass_overwrites_without_duplicates() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        tree.insert_child(form, ElementData::new("email").with_validator(reject_empty))
            .unwrap();
        tree.insert_child(form, ElementData::new("name")).unwrap();

        let data = json!({"form": {"email": ""}});
        let first = tree.validate(form, &data).unwrap();
        let second = tree.validate(form, &data).unwrap();
        assert_eq!(first, second);
        assert_eq!(second["form__email"].len(), 1);
    }

    #[test]
    fn own_validators_see_processed_value() {
        let mut tree = FormTree::new();
        let form = tree
            .insert(
                ElementData::new("age")
                    .with_processor(|v| json!(v.as_str().and_then(|s| s.parse::<i64>().ok())))
                    .with_validator(|v| v.is_null().then(|| "not a number".to_owned())),
            )
            .unwrap();

        let errors = tree.validate(form, &json!({"age": "41"})).unwrap();
        assert!(errors.is_empty());
        assert_eq!(tree.cleaned_value(form).unwrap(), &json!(41));

        let errors = tree.validate(form, &json!({"age": "old"})).unwrap();
        assert_eq!(errors["age"], vec!["not a number"]);
    }

    #[test]
    fn skipped_subtree_state_is_cleared() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        let person = tree.insert_child(form, ElementData::new("person")).unwrap();
        let first = tree.insert_child(person, ElementData::new("first")).unwrap();

        tree.validate(form, &json!({"form": {"person": {"first": "Ada"}}}))
            .unwrap();
        assert_eq!(tree.cleaned_value(first).unwrap(), &json!("Ada"));

        tree.validate(form, &json!({"form": {}})).unwrap();
        assert_eq!(tree.cleaned_value(first).unwrap(), &Value::Null);
    }

    #[test]
    fn validate_submission_wraps_root() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        tree.insert_child(form, ElementData::new("name")).unwrap();

        let errors = tree.validate_submission(json!({"name": "Ada"})).unwrap();
        assert!(errors.is_empty());
        assert!(tree.is_valid(form).unwrap());
    }

    #[test]
    fn scalar_for_group_gives_children_null() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        tree.insert_child(form, ElementData::new("a")).unwrap();
        let errors = tree.validate(form, &json!({"form": 5})).unwrap();
        assert_eq!(errors["form__a"], vec![REQUIRED_MESSAGE]);
    }

    #[test]
    fn reset_clears_subtree() {
        let mut tree = FormTree::new();
        let form = tree.insert(ElementData::new("form")).unwrap();
        let a = tree.insert_child(form, ElementData::new("a")).unwrap();
        tree.validate(form, &json!({"form": {}})).unwrap();
        assert!(!tree.is_valid(form).unwrap());

        tree.reset(form).unwrap();
        assert!(tree.is_valid(form).unwrap());
        assert_eq!(tree.cleaned_value(a).unwrap(), &Value::Null);
    }
}
