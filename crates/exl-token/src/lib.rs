//! Shared token model for the ExL markup rewrite pipeline.
//!
//! A parsed document is represented as a flat, order-significant sequence of
//! [`Token`]s. Block-level constructs are linearized with an open/close
//! convention: a block begins with an open token and ends with a matching
//! close token at the same nesting depth, with its children in between.
//!
//! The rewrite passes in `exl-markup` receive the sequence by mutable
//! reference and mutate tags, attributes and inline content in place. Every
//! pass must leave the sequence well-nested: each open token keeps exactly
//! one matching close token, in document order.

use std::collections::BTreeMap;

/// Discriminator for the structural role of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenType {
    /// Opens a quoted block.
    BlockquoteOpen,
    /// Closes a quoted block.
    BlockquoteClose,
    /// Opens a paragraph.
    ParagraphOpen,
    /// Closes a paragraph.
    ParagraphClose,
    /// Inline text content of the enclosing block.
    Inline,
    /// Opens a heading.
    HeadingOpen,
    /// Closes a heading.
    HeadingClose,
    /// Opens a table.
    TableOpen,
    /// Closes a table.
    TableClose,
    /// Raw or synthetic markup emitted verbatim by the renderer.
    Html,
}

/// An attribute value on a token.
///
/// Most attributes are strings, but the video rewrite sets boolean
/// (`controls`) and numeric (`height`) attributes as well.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrValue {
    /// String attribute.
    Str(String),
    /// Boolean attribute.
    Bool(bool),
    /// Integer attribute.
    Int(i64),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// One element of the linearized document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Structural role. Fixed for the lifetime of the token; rewrite passes
    /// change the rendered element via [`tag`](Self::tag) instead.
    pub token_type: TokenType,
    /// Element name the token will render as (e.g. `blockquote`, `div`).
    pub tag: String,
    /// Attribute map. Keys are unique; insertion order is irrelevant.
    pub attrs: BTreeMap<String, AttrValue>,
    /// Text content. Meaningful for [`TokenType::Inline`] and
    /// [`TokenType::Html`] tokens, empty otherwise.
    pub content: String,
}

impl Token {
    /// Create a token with the given type and tag, no attributes, no content.
    #[must_use]
    pub fn new(token_type: TokenType, tag: impl Into<String>) -> Self {
        Self {
            token_type,
            tag: tag.into(),
            attrs: BTreeMap::new(),
            content: String::new(),
        }
    }

    /// Create an inline content token.
    #[must_use]
    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            token_type: TokenType::Inline,
            tag: String::new(),
            attrs: BTreeMap::new(),
            content: content.into(),
        }
    }

    /// Create a raw markup token. Used for synthetic tokens spliced into the
    /// sequence by rewrite passes.
    #[must_use]
    pub fn html(content: impl Into<String>) -> Self {
        Self {
            token_type: TokenType::Html,
            tag: String::new(),
            attrs: BTreeMap::new(),
            content: content.into(),
        }
    }

    /// Create a `blockquote` open token.
    #[must_use]
    pub fn blockquote_open() -> Self {
        Self::new(TokenType::BlockquoteOpen, "blockquote")
    }

    /// Create a `blockquote` close token.
    #[must_use]
    pub fn blockquote_close() -> Self {
        Self::new(TokenType::BlockquoteClose, "blockquote")
    }

    /// Create a paragraph open token.
    #[must_use]
    pub fn paragraph_open() -> Self {
        Self::new(TokenType::ParagraphOpen, "p")
    }

    /// Create a paragraph close token.
    #[must_use]
    pub fn paragraph_close() -> Self {
        Self::new(TokenType::ParagraphClose, "p")
    }

    /// Create a heading open token with the given level (1-6).
    #[must_use]
    pub fn heading_open(level: u8) -> Self {
        Self::new(TokenType::HeadingOpen, format!("h{level}"))
    }

    /// Create a heading close token with the given level (1-6).
    #[must_use]
    pub fn heading_close(level: u8) -> Self {
        Self::new(TokenType::HeadingClose, format!("h{level}"))
    }

    /// Set an attribute, replacing any previous value under the same key.
    pub fn attr_set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Look up a string attribute value.
    #[must_use]
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        match self.attrs.get(name) {
            Some(AttrValue::Str(s)) => Some(s),
            _ => None,
        }
    }
}
