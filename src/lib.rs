//! # arbor-forms
//!
//! Tree-structured form definitions. Each element is a field or a group of
//! fields; elements nest to mirror a hierarchical (XSD-like) schema. The tree
//! validates submitted data in one collect-all pass, aggregates cleaned
//! values, renders itself to HTML and serializes cleaned data to JSON or XML.
//!
//! ## Core Systems
//!
//! - **[`tree`]**: Slotmap-backed element arena and tree queries
//! - **[`naming`]**: Prefixed names (`form__person__first`) and inline suffixes
//! - **[`pipeline`]**: Processors and validators
//! - **[`validate`]**: Depth-first validation with error aggregation
//! - **[`cleaned`]**: Memoized cleaned-data aggregation
//! - **[`view`]**: Read-only node projection for renderers
//! - **[`render`]**: Renderer trait, HTML renderer, `{placeholder}` templates
//! - **[`serialize`]**: JSON and XML serializers
//! - **[`schema`]**: Declarative tree descriptions
//! - **[`validators`]**: Stock validators and processors
//! - **[`config`]**: Tree and render configuration
//! - **[`error`]**: Error type and field-error map
//!
//! ## Example
//!
//! ```
//! use arbor_forms::tree::{ElementData, FormTree};
//! use arbor_forms::validators;
//! use serde_json::json;
//!
//! let mut tree = FormTree::new();
//! let form = tree.insert(ElementData::new("form")).unwrap();
//! let email = tree.insert_child(form, ElementData::new("email")).unwrap();
//! tree.add_validator(email, validators::email()).unwrap();
//!
//! let errors = tree.validate_submission(json!({"email": "nope"})).unwrap();
//! assert_eq!(errors["form__email"], vec!["Enter a valid email address"]);
//!
//! tree.validate_submission(json!({"email": "ada@example.com"})).unwrap();
//! assert_eq!(
//!     tree.cleaned_data(form).unwrap(),
//!     json!({"form": {"email": "ada@example.com"}})
//! );
//! ```

// Foundation
pub mod config;
pub mod error;

// Core systems
pub mod tree;
pub mod naming;
pub mod pipeline;
pub mod validate;
pub mod cleaned;

// Output
pub mod view;
pub mod render;
pub mod serialize;

// Authoring
pub mod schema;
pub mod validators;

// Test support
pub mod testing;

pub use config::{RenderConfig, TreeConfig};
pub use error::{ErrorMap, FormError, Result};
pub use schema::Schema;
pub use tree::{ElementData, ElementId, FormTree, UNBOUNDED};
pub use validate::REQUIRED_MESSAGE;

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use arbor_forms_macros::schema;
