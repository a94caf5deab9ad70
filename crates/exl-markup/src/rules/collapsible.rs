//! Collapsible section rewriting: paired `+++ summary` / `+++` inline
//! markers become disclosure-widget open/close structure.

use exl_token::{Token, TokenType};

use super::TokenRule;

/// Converts `+++`-delimited sections into `<details>` / `<summary>` markup.
///
/// The opening sentinel token is replaced by a disclosure-open token, with a
/// synthetic summary token spliced in after it; the closing sentinel token is
/// replaced by a disclosure-close token. Converted tokens are raw markup,
/// which the rule never matches, so re-running it cannot double-wrap.
///
/// A section left open at the end of the document is auto-closed there.
pub struct CollapsibleRule {
    prefix: String,
}

impl CollapsibleRule {
    /// Create the rule with the default `+++` sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix("+++")
    }

    /// Create the rule with a custom sentinel prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Does this token open or close a section?
    fn is_sentinel(&self, token: &Token) -> bool {
        token.token_type == TokenType::Inline && token.content.trim_start().starts_with(&self.prefix)
    }
}

impl Default for CollapsibleRule {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRule for CollapsibleRule {
    fn name(&self) -> &'static str {
        "collapsible"
    }

    fn apply(&mut self, tokens: &mut Vec<Token>) {
        let mut open = false;
        let mut i = 0;

        while i < tokens.len() {
            if !self.is_sentinel(&tokens[i]) {
                i += 1;
                continue;
            }

            if open {
                tokens[i] = Token::html("</details>");
                open = false;
                i += 1;
            } else {
                let summary = tokens[i]
                    .content
                    .trim_start()
                    .strip_prefix(&self.prefix)
                    .unwrap_or_default()
                    .trim()
                    .to_owned();
                tokens[i] = Token::html("<details>");
                tokens.insert(i + 1, Token::html(format!("<summary>{summary}</summary>")));
                open = true;
                i += 2;
            }
        }

        if open {
            tracing::warn!("collapsible section not closed, auto-closing at end of document");
            tokens.push(Token::html("</details>"));
        }
    }
}
