//! Admonition rewriting: quoted blocks whose first line names a recognized
//! label become labeled alert containers; `[!VIDEO](url)` blocks become
//! embedded video elements.
//!
//! A single stateful left-to-right scan. Each step returns how far to
//! advance the cursor, so the skip over synthesized video close tags is
//! explicit rather than hidden index arithmetic.

use exl_token::{Token, TokenType};
use regex::Regex;

use super::TokenRule;

/// Recognized admonition labels, in the grammar `[!LABEL]`.
const LABELS: &[&str] = &[
    "NOTE",
    "CAUTION",
    "IMPORTANT",
    "TIP",
    "WARNING",
    "ADMINISTRATION",
    "AVAILABILITY",
    "PREREQUISITES",
    "ERROR",
    "INFO",
    "SUCCESS",
    "MORELIKETHIS",
];

/// Poster image shown before video playback starts.
const VIDEO_POSTER: &str = "/assets/img/video_slug.png";

/// Scan state: the stack of currently open blockquote token indices.
///
/// A stack (rather than a single start slot) keeps close tokens paired with
/// their own opens, so nested quoted blocks stay well-nested; an inner
/// labeled block overrides the label for the inner block only.
#[derive(Debug, Default)]
struct Scan {
    open_blocks: Vec<usize>,
}

/// Rewrites quoted blocks into alert containers and video embeds.
pub struct AdmonitionRule {
    label_pattern: Regex,
    video_pattern: Regex,
}

impl AdmonitionRule {
    /// Create the rule with the standard label set.
    #[must_use]
    pub fn new() -> Self {
        let labels = LABELS.join("|");
        Self {
            label_pattern: Regex::new(&format!(r"^\[!({labels})\]\s*((?s:.*))")).unwrap(),
            video_pattern: Regex::new(r"^\[!VIDEO\]\s*\((.*)\)").unwrap(),
        }
    }

    /// Process the token at `i` and return how far to advance.
    fn step(&self, tokens: &mut [Token], i: usize, scan: &mut Scan) -> usize {
        match tokens[i].token_type {
            TokenType::BlockquoteOpen => {
                scan.open_blocks.push(i);
                1
            }
            TokenType::BlockquoteClose => {
                // Pair the close with its own open so both render as the
                // same element.
                if let Some(start) = scan.open_blocks.pop() {
                    tokens[i].tag = tokens[start].tag.clone();
                }
                1
            }
            _ if scan.open_blocks.is_empty() => 1,
            TokenType::ParagraphOpen => {
                // Alert bodies mark up paragraphs as <div class="p">.
                tokens[i].tag = "div".to_owned();
                tokens[i].attr_set("class", "p");
                1
            }
            TokenType::ParagraphClose => {
                tokens[i].tag = "div".to_owned();
                1
            }
            TokenType::Inline if i > 0 && tokens[i - 1].token_type == TokenType::ParagraphOpen => {
                self.rewrite_inline(tokens, i, scan)
            }
            _ => 1,
        }
    }

    /// Classify the first inline of a paragraph inside a quoted block.
    fn rewrite_inline(&self, tokens: &mut [Token], i: usize, scan: &mut Scan) -> usize {
        let Some(&start) = scan.open_blocks.last() else {
            return 1;
        };

        let label_hit = self
            .label_pattern
            .captures(&tokens[i].content)
            .map(|caps| (caps[1].to_owned(), caps[2].to_owned()));
        if let Some((label, message)) = label_hit {
            tokens[i].content = message;
            let display = if label == "MORELIKETHIS" {
                "Related Articles".to_owned()
            } else {
                label.clone()
            };
            tokens[start].tag = "div".to_owned();
            tokens[start].attr_set("class", format!("extension {}", label.to_lowercase()));
            tokens[start].attr_set("data-label", display);
            return 1;
        }

        let video_hit = self
            .video_pattern
            .captures(&tokens[i].content)
            .map(|caps| caps[1].to_owned());
        if let Some(url) = video_hit {
            tokens[start].tag = "div".to_owned();
            tokens[start].attr_set("class", "extension video");

            let open = &mut tokens[i - 1];
            open.tag = "video".to_owned();
            open.attr_set("allowfullscreen", true);
            open.attr_set("controls", true);
            open.attr_set("height", 250);
            open.attr_set("poster", VIDEO_POSTER);
            open.attr_set("crossorigin", "anonymous");
            open.attr_set("src", url);

            tokens[i].content.clear();
            if let Some(close) = tokens.get_mut(i + 1) {
                close.tag = "video".to_owned();
            }
            // Skip the closing video tag we just made.
            return 2;
        }

        // Ordinary quoted block: keep the retagged paragraphs as-is.
        1
    }
}

impl Default for AdmonitionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRule for AdmonitionRule {
    fn name(&self) -> &'static str {
        "alert"
    }

    fn apply(&mut self, tokens: &mut Vec<Token>) {
        let mut scan = Scan::default();
        let mut i = 0;
        while i < tokens.len() {
            i += self.step(tokens, i, &mut scan);
        }
    }
}
