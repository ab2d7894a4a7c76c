//! logos-based `{placeholder}` templates.
//!
//! A template is split once into literal runs and placeholder slots. Values
//! are supplied through a [`Context`]: `text` values are HTML-escaped, `raw`
//! values (already-rendered markup) are inserted as-is. Placeholders missing
//! from the context are written back verbatim, braces included.

use std::collections::HashMap;

use logos::Logos;

/// Template token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
enum Token {
    /// `{name}`; names may contain dashes so metadata keys like
    /// `data-gs-col` work.
    #[regex(r"\{[a-zA-Z_][a-zA-Z0-9_-]*\}")]
    Placeholder,

    /// Any run of text without an opening brace.
    #[regex(r"[^{]+")]
    Text,

    /// A lone `{` that does not start a placeholder.
    #[token("{")]
    Brace,
}

#[derive(Debug, Clone, PartialEq)]
enum Part {
    Literal(String),
    Slot(String),
}

/// A compiled template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    parts: Vec<Part>,
}

impl Template {
    /// Split `source` into literals and placeholder slots.
    pub fn compile(source: &str) -> Self {
        let mut parts: Vec<Part> = Vec::new();
        let mut lexer = Token::lexer(source);
        while let Some(token) = lexer.next() {
            let slice = lexer.slice();
            match token {
                Ok(Token::Placeholder) => {
                    parts.push(Part::Slot(slice[1..slice.len() - 1].to_owned()));
                }
                Ok(Token::Text) | Ok(Token::Brace) | Err(_) => match parts.last_mut() {
                    Some(Part::Literal(text)) => text.push_str(slice),
                    _ => parts.push(Part::Literal(slice.to_owned())),
                },
            }
        }
        Self {
            source: source.to_owned(),
            parts,
        }
    }

    /// The original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            Part::Slot(name) => Some(name.as_str()),
            Part::Literal(_) => None,
        })
    }

    /// Substitute the context into the template.
    pub fn render(&self, context: &Context) -> String {
        let mut out = String::with_capacity(self.source.len());
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Slot(name) => match context.values.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

/// Values for one template render.
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: HashMap<String, String>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain-text value; it is HTML-escaped (builder).
    pub fn text(mut self, key: impl Into<String>, value: &str) -> Self {
        self.values.insert(key.into(), escape_html(value));
        self
    }

    /// Add pre-rendered markup, inserted unescaped (builder).
    pub fn raw(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}
