//! Inline directive strippers: `[!DNL ...]`, `[!UICONTROL ...]` and
//! `{style ...}` markers.

use std::borrow::Cow;

use exl_token::{Token, TokenType};
use regex::Regex;

use super::TokenRule;

/// Strips `[!KEYWORD text]` bracket directives from inline content, leaving
/// just `text`.
///
/// Replacement is leftmost, non-overlapping and single-pass: every
/// occurrence in a token is replaced in one scan.
pub struct BracketDirectiveRule {
    name: &'static str,
    pattern: Regex,
}

impl BracketDirectiveRule {
    /// Create a rule for an arbitrary keyword.
    #[must_use]
    pub fn new(name: &'static str, keyword: &str) -> Self {
        let pattern = Regex::new(&format!(r"\[!{}\s+([^\]]+)\]", regex::escape(keyword))).unwrap();
        Self { name, pattern }
    }

    /// Rule for `[!DNL ...]` (Do Not Localize) markers.
    #[must_use]
    pub fn dnl() -> Self {
        Self::new("dnl", "DNL")
    }

    /// Rule for `[!UICONTROL ...]` markers.
    #[must_use]
    pub fn uicontrol() -> Self {
        Self::new("uicontrol", "UICONTROL")
    }
}

impl TokenRule for BracketDirectiveRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&mut self, tokens: &mut Vec<Token>) {
        for token in tokens.iter_mut().filter(|t| t.token_type == TokenType::Inline) {
            if let Cow::Owned(stripped) = self.pattern.replace_all(&token.content, "$1") {
                token.content = stripped;
            }
        }
    }
}

/// Drops `{style ...}` brace directives from inline content without applying
/// them, so unrecognized directive text does not leak into the output.
pub struct TableStyleRule {
    pattern: Regex,
}

impl TableStyleRule {
    /// Create the rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\{style[^}]*\}").unwrap(),
        }
    }
}

impl Default for TableStyleRule {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRule for TableStyleRule {
    fn name(&self) -> &'static str {
        "table-styles"
    }

    fn apply(&mut self, tokens: &mut Vec<Token>) {
        for token in tokens.iter_mut().filter(|t| t.token_type == TokenType::Inline) {
            if let Cow::Owned(stripped) = self.pattern.replace(&token.content, "") {
                token.content = stripped;
            }
        }
    }
}
