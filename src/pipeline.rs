//! Value pipeline: processors and validators.
//!
//! A processor is a total transform `Value -> Value`; processors run left to
//! right, each consuming the previous output. A validator inspects the
//! processed value and returns `Some(message)` to reject it.

use serde_json::Value;

use crate::error::Result;
use crate::tree::{ElementId, FormTree};

/// Value transform applied before validation.
pub type Processor = Box<dyn Fn(Value) -> Value + Send + Sync>;

/// Validation rule: `None` (or an empty message) means valid.
pub type Validator = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Fold `value` through `processors` in order.
pub fn apply_processors(processors: &[Processor], value: Value) -> Value {
    processors
        .iter()
        .fold(value, |acc, processor| processor(acc))
}

/// Run every validator against `value`, keeping non-empty messages in order.
pub fn collect_rejections(validators: &[Validator], value: &Value) -> Vec<String> {
    validators
        .iter()
        .filter_map(|validator| validator(value))
        .filter(|message| !message.is_empty())
        .collect()
}

impl FormTree {
    /// Append a validator to a node.
    pub fn add_validator<F>(&mut self, id: ElementId, validator: F) -> Result<()>
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.node_mut(id)?.validators.push(Box::new(validator));
        Ok(())
    }

    /// Append a processor to a node.
    pub fn add_processor<F>(&mut self, id: ElementId, processor: F) -> Result<()>
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.node_mut(id)?.processors.push(Box::new(processor));
        Ok(())
    }

    /// Apply the node's processors to `value`. The node itself is untouched.
    pub fn process_value(&self, id: ElementId, value: Value) -> Result<Value> {
        Ok(apply_processors(&self.node(id)?.processors, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementData;
    use serde_json::json;

    fn append(suffix: &'static str) -> Processor {
        Box::new(move |v: Value| match v {
            Value::String(s) => Value::String(s + suffix),
            other => other,
        })
    }

    #[test]
    fn processors_compose_left_to_right() {
        let processors = vec![append("-f1"), append("-f2")];
        assert_eq!(apply_processors(&processors, json!("x")), json!("x-f1-f2"));
    }

    #[test]
    fn no_processors_is_identity() {
        assert_eq!(apply_processors(&[], json!({"a": 1})), json!({"a": 1}));
    }

    #[test]
    fn empty_messages_are_not_rejections() {
        let validators: Vec<Validator> = vec![
            Box::new(|_: &Value| Some(String::new())),
            Box::new(|_: &Value| -> Option<String> { None }),
            Box::new(|_: &Value| Some("bad".into())),
        ];
        assert_eq!(collect_rejections(&validators, &Value::Null), vec!["bad"]);
    }

    #[test]
    fn tree_process_value_uses_registered_processors() {
        let mut tree = FormTree::new();
        let id = tree.insert(ElementData::new("n")).unwrap();
        tree.add_processor(id, |v| match v {
            Value::Number(n) => json!(n.as_i64().unwrap_or(0) + 1),
            other => other,
        })
        .unwrap();
        tree.add_processor(id, |v| match v {
            Value::Number(n) => json!(n.as_i64().unwrap_or(0) * 10),
            other => other,
        })
        .unwrap();
        assert_eq!(tree.process_value(id, json!(2)).unwrap(), json!(30));
    }
}
