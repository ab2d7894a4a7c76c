//! Proc macros for arbor-forms: `schema!` declarative tree descriptions.
//!
//! Not meant to be used directly; enable the `macros` feature on `arbor-forms`.

use proc_macro::TokenStream;

mod schema_macro;

/// XML-like element tree description.
///
/// Expands to an `arbor_forms::Schema` that `FormTree::mount` inserts.
///
/// # Syntax
///
/// - `<name />`: leaf element (no children)
/// - `<name attr=value> ... </name>`: element with children
///
/// The tag is the element name; use `name="..."` for names that are not
/// Rust identifiers.
///
/// # Attributes
///
/// - `label="..."`, `help="..."`: label and help text
/// - `min_occurs=N`, `max_occurs=N`: occurrence bounds; `max_occurs="unbounded"`
/// - `choice=true`: mark as a choice group
///
/// # Example
///
/// ```ignore
/// let schema = schema! {
///     <order label="Order">
///         <customer>
///             <email help="We send the receipt here" />
///         </customer>
///         <line min_occurs=1 max_occurs="unbounded">
///             <sku />
///             <qty />
///         </line>
///     </order>
/// };
/// ```
#[proc_macro]
pub fn schema(input: TokenStream) -> TokenStream {
    schema_macro::schema_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
