//! Heading anchor and link target extraction.

use exl_token::{Token, TokenType};
use regex::Regex;

use super::TokenRule;

/// Pulls a trailing `{#id}` marker off heading text into the heading-open
/// token's `id` attribute.
pub struct HeadingAnchorRule {
    pattern: Regex,
}

impl HeadingAnchorRule {
    /// Create the rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\{#([^}]+)\}").unwrap(),
        }
    }
}

impl Default for HeadingAnchorRule {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRule for HeadingAnchorRule {
    fn name(&self) -> &'static str {
        "heading-anchors"
    }

    fn apply(&mut self, tokens: &mut Vec<Token>) {
        for i in 0..tokens.len() {
            if tokens[i].token_type != TokenType::HeadingOpen {
                continue;
            }
            let Some(next) = tokens.get(i + 1) else {
                continue;
            };
            if next.token_type != TokenType::Inline {
                continue;
            }

            let hit = self
                .pattern
                .captures(&next.content)
                .map(|caps| (caps[1].to_owned(), caps.get(0).map_or(0, |m| m.start())));
            if let Some((id, start)) = hit {
                let text = tokens[i + 1].content[..start].trim_end().to_owned();
                tokens[i + 1].content = text;
                tokens[i].attr_set("id", id);
            }
        }
    }
}

/// Pulls a `{target=...}` marker out of inline link text into the token's
/// `target` attribute. Tolerant of variant spellings and casing around the
/// word `target`; only the first marker per token is consumed, and an empty
/// value sets no attribute.
pub struct LinkTargetRule {
    pattern: Regex,
}

impl LinkTargetRule {
    /// Create the rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(?i)\{[^{}=]*target[^{}=]*=\s*([^}]*)\}").unwrap(),
        }
    }
}

impl Default for LinkTargetRule {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRule for LinkTargetRule {
    fn name(&self) -> &'static str {
        "link-target"
    }

    fn apply(&mut self, tokens: &mut Vec<Token>) {
        for token in tokens.iter_mut().filter(|t| t.token_type == TokenType::Inline) {
            let hit = self.pattern.captures(&token.content).map(|caps| {
                let whole = caps.get(0).map_or(0..0, |m| m.range());
                let value = caps[1].trim().trim_matches('"').to_owned();
                (value, whole)
            });
            if let Some((target, range)) = hit {
                token.content.replace_range(range, "");
                if !target.is_empty() {
                    token.attr_set("target", target);
                }
            }
        }
    }
}
