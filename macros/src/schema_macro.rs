//! schema! macro: parse XML-like element syntax and generate arbor-forms `Schema` code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Ident, Lit, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A parsed attribute: `name=literal`.
#[derive(Clone)]
pub(crate) struct Attribute {
    pub name: Ident,
    pub value: Lit,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name.to_string())
            .finish_non_exhaustive()
    }
}

/// A parsed element: `<tag attrs... />` or `<tag attrs...> children </tag>`.
#[derive(Clone)]
pub(crate) struct Element {
    pub tag: Ident,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Element>,
    pub self_closing: bool,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag.to_string())
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .field("self_closing", &self.self_closing)
            .finish()
    }
}

/// The top-level schema! input: a sequence of elements (exactly one is valid).
#[derive(Debug)]
struct SchemaInput {
    elements: Vec<Element>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for SchemaInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut elements = Vec::new();
        while !input.is_empty() {
            elements.push(parse_element(input)?);
        }
        Ok(SchemaInput { elements })
    }
}

/// Parse a single element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;

    // Keywords are fine as element names: `<type />`.
    let tag = input.call(Ident::parse_any)?;

    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }

        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }

        let name = input.call(Ident::parse_any)?;
        input.parse::<Token![=]>()?;
        let value: Lit = input.parse()?;
        attrs.push(Attribute { name, value });
    }

    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing_tag = input.call(Ident::parse_any)?;
            if closing_tag != tag {
                return Err(Error::new(
                    closing_tag.span(),
                    format!(
                        "mismatched closing tag: expected `</{}>`, found `</{}>`",
                        tag, closing_tag
                    ),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }

        if input.peek(Token![<]) {
            children.push(parse_element(input)?);
        } else {
            return Err(input.error("expected `<` to start a child element or `</` to close the parent"));
        }
    }

    Ok(Element {
        tag,
        attrs,
        children,
        self_closing: false,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

fn expect_str(attr: &Attribute) -> Result<syn::LitStr> {
    match &attr.value {
        Lit::Str(s) => Ok(s.clone()),
        other => Err(Error::new(other.span(), format!("`{}` expects a string", attr.name))),
    }
}

fn expect_int(attr: &Attribute) -> Result<syn::LitInt> {
    match &attr.value {
        Lit::Int(i) => Ok(i.clone()),
        other => Err(Error::new(other.span(), format!("`{}` expects an integer", attr.name))),
    }
}

/// Generate code for a single element.
fn generate_element(elem: &Element) -> Result<TokenStream> {
    let mut name = elem.tag.unraw().to_string();
    let mut builder_calls = Vec::new();

    for attr in &elem.attrs {
        match attr.name.unraw().to_string().as_str() {
            "name" => name = expect_str(attr)?.value(),
            "label" => {
                let val = expect_str(attr)?;
                builder_calls.push(quote! { .with_label(#val) });
            }
            "help" => {
                let val = expect_str(attr)?;
                builder_calls.push(quote! { .with_help(#val) });
            }
            "min_occurs" => {
                let val = expect_int(attr)?;
                builder_calls.push(quote! { .with_min_occurs(#val) });
            }
            "max_occurs" => match &attr.value {
                Lit::Str(s) if s.value() == "unbounded" => {
                    builder_calls.push(quote! { .with_max_occurs(::arbor_forms::UNBOUNDED) });
                }
                _ => {
                    let val = expect_int(attr)?;
                    builder_calls.push(quote! { .with_max_occurs(#val) });
                }
            },
            "choice" => match &attr.value {
                Lit::Bool(b) => builder_calls.push(quote! { .choice(#b) }),
                other => return Err(Error::new(other.span(), "`choice` expects `true` or `false`")),
            },
            other => {
                return Err(Error::new(
                    attr.name.span(),
                    format!("unknown attribute `{other}`"),
                ))
            }
        }
    }

    let children = elem
        .children
        .iter()
        .map(generate_element)
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        ::arbor_forms::Schema::new(
            ::arbor_forms::ElementData::new(#name) #(#builder_calls)*
        ) #(.child(#children))*
    })
}

/// Entry point: generate code for the entire schema! macro.
pub(crate) fn schema_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: SchemaInput = syn::parse2(input)?;

    match parsed.elements.as_slice() {
        [] => Err(Error::new(
            Span::call_site(),
            "schema! macro requires a root element",
        )),
        [root] => generate_element(root),
        [_, second, ..] => Err(Error::new(
            second.tag.span(),
            "schema! macro takes exactly one root element",
        )),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
