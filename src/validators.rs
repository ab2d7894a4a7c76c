//! Stock validators and processors.
//!
//! String validators pass non-string values through (they return `None`), so
//! they compose with processors that convert types. Pair them with
//! `min_occurs` for presence: a validator never sees a missing required value.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::Result;
use crate::pipeline::{Processor, Validator};

// Pragmatic address check: one `@`, no whitespace, a dotted domain.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Reject empty strings (after processing) with `message`.
pub fn non_empty(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &Value| match value {
        Value::String(s) if s.is_empty() => Some(message.clone()),
        _ => None,
    })
}

/// Reject strings shorter than `min` characters.
pub fn min_length(min: usize) -> Validator {
    Box::new(move |value: &Value| match value {
        Value::String(s) if s.chars().count() < min => {
            Some(format!("Ensure this value has at least {min} characters"))
        }
        _ => None,
    })
}

/// Reject strings longer than `max` characters.
pub fn max_length(max: usize) -> Validator {
    Box::new(move |value: &Value| match value {
        Value::String(s) if s.chars().count() > max => {
            Some(format!("Ensure this value has at most {max} characters"))
        }
        _ => None,
    })
}

/// Reject strings not matching `pattern`.
pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Validator> {
    let regex = Regex::new(pattern)?;
    let message = message.into();
    Ok(Box::new(move |value: &Value| match value {
        Value::String(s) if !regex.is_match(s) => Some(message.clone()),
        _ => None,
    }))
}

/// Reject strings that do not look like an e-mail address.
pub fn email() -> Validator {
    Box::new(|value: &Value| match value {
        Value::String(s) if !EMAIL_REGEX.is_match(s) => {
            Some("Enter a valid email address".to_owned())
        }
        _ => None,
    })
}

/// Reject non-null values outside `choices`.
pub fn one_of(choices: Vec<Value>) -> Validator {
    Box::new(move |value: &Value| {
        if value.is_null() || choices.contains(value) {
            None
        } else {
            Some(format!("Select a valid choice. {value} is not one of the available choices"))
        }
    })
}

// ---------------------------------------------------------------------------
// Processors
// ---------------------------------------------------------------------------

/// Trim surrounding whitespace from strings.
pub fn trim() -> Processor {
    Box::new(|value: Value| match value {
        Value::String(s) => Value::String(s.trim().to_owned()),
        other => other,
    })
}

/// Turn empty strings into `null`, so requiredness applies to them.
pub fn empty_as_null() -> Processor {
    Box::new(|value: Value| match value {
        Value::String(s) if s.is_empty() => Value::Null,
        other => other,
    })
}

/// Lowercase strings.
pub fn lowercase() -> Processor {
    Box::new(|value: Value| match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        other => other,
    })
}

/// Parse numeric strings into numbers; other strings are left as-is.
pub fn parse_number() -> Processor {
    Box::new(|value: Value| match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                Value::from(i)
            } else if let Some(n) = trimmed
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
            {
                Value::Number(n)
            } else {
                Value::String(s)
            }
        }
        other => other,
    })
}
