//! Token-stream rewrite rules.
//!
//! Each rule is a single left-to-right scan over the shared token sequence,
//! mutating tags, attributes and inline content in place. Rules are
//! idempotent with respect to tokens they do not recognize, and every rule
//! leaves the sequence well-nested.
//!
//! The rules must run in the order installed by [`RulePipeline::standard`]:
//! the admonition rewriter assumes blockquote and paragraph tags are still in
//! their pre-rewrite form, and later rules must not re-touch tokens it has
//! finalized.

mod admonition;
mod anchors;
mod collapsible;
mod strip;

pub use admonition::AdmonitionRule;
pub use anchors::{HeadingAnchorRule, LinkTargetRule};
pub use collapsible::CollapsibleRule;
pub use strip::{BracketDirectiveRule, TableStyleRule};

use exl_token::Token;

use crate::MarkupConfig;

/// A single rewrite pass over the token sequence.
pub trait TokenRule {
    /// Stable rule name, used for trace logging.
    fn name(&self) -> &'static str;

    /// Apply the rule, mutating the sequence in place.
    fn apply(&mut self, tokens: &mut Vec<Token>);
}

/// Ordered collection of rewrite rules applied to one token stream.
///
/// # Example
///
/// ```
/// use exl_markup::RulePipeline;
/// use exl_token::Token;
///
/// let mut tokens = vec![
///     Token::heading_open(2),
///     Token::inline("Install [!DNL Acrobat] {#install}"),
///     Token::heading_close(2),
/// ];
///
/// let mut pipeline = RulePipeline::standard();
/// pipeline.run(&mut tokens);
///
/// assert_eq!(tokens[0].attr_str("id"), Some("install"));
/// assert_eq!(tokens[1].content, "Install Acrobat");
/// ```
pub struct RulePipeline {
    rules: Vec<Box<dyn TokenRule>>,
}

impl RulePipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create the standard pipeline with every rule in its fixed order.
    #[must_use]
    pub fn standard() -> Self {
        Self::standard_with(&MarkupConfig::default())
    }

    /// Create the standard pipeline, taking the collapsible sentinel from
    /// the configuration.
    #[must_use]
    pub fn standard_with(config: &MarkupConfig) -> Self {
        Self::new()
            .with_rule(BracketDirectiveRule::dnl())
            .with_rule(BracketDirectiveRule::uicontrol())
            .with_rule(AdmonitionRule::new())
            .with_rule(HeadingAnchorRule::new())
            .with_rule(LinkTargetRule::new())
            .with_rule(TableStyleRule::new())
            .with_rule(CollapsibleRule::with_prefix(
                config.collapsible_prefix.as_str(),
            ))
    }

    /// Append a rule to the pipeline.
    #[must_use]
    pub fn with_rule<R: TokenRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Run every rule, in order, over the token sequence.
    pub fn run(&mut self, tokens: &mut Vec<Token>) {
        for rule in &mut self.rules {
            tracing::trace!(rule = rule.name(), "applying token rule");
            rule.apply(tokens);
        }
    }
}

impl Default for RulePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exl_token::{AttrValue, TokenType};
    use pretty_assertions::assert_eq;

    /// A document mixing every directive family, run through the standard
    /// pipeline.
    #[test]
    fn test_standard_pipeline_mixed_document() {
        let mut tokens = vec![
            // Heading with anchor and localization marker
            Token::heading_open(1),
            Token::inline("About [!DNL Workfront] {#about}"),
            Token::heading_close(1),
            // Admonition
            Token::blockquote_open(),
            Token::paragraph_open(),
            Token::inline("[!TIP]\nUse [!UICONTROL Save As] instead."),
            Token::paragraph_close(),
            Token::blockquote_close(),
            // Paragraph with link target and table style leftovers
            Token::paragraph_open(),
            Token::inline("[docs](https://example.com){target=_blank} {style=\"layout:fixed\"}"),
            Token::paragraph_close(),
        ];

        let mut pipeline = RulePipeline::standard();
        pipeline.run(&mut tokens);

        assert_eq!(tokens[0].attr_str("id"), Some("about"));
        assert_eq!(tokens[1].content, "About Workfront");

        assert_eq!(tokens[3].tag, "div");
        assert_eq!(tokens[3].attr_str("class"), Some("extension tip"));
        assert_eq!(tokens[3].attr_str("data-label"), Some("TIP"));
        assert_eq!(tokens[5].content, "Use Save As instead.");
        assert_eq!(tokens[7].tag, "div");

        assert_eq!(tokens[9].attr_str("target"), Some("_blank"));
        assert_eq!(tokens[9].content, "[docs](https://example.com) ");
    }

    #[test]
    fn test_configured_collapsible_prefix_takes_effect() {
        let config = MarkupConfig::new().with_collapsible_prefix("!!!");
        let mut tokens = vec![
            Token::inline("!!! Hidden"),
            Token::inline("body"),
            Token::inline("!!!"),
        ];

        let mut pipeline = RulePipeline::standard_with(&config);
        pipeline.run(&mut tokens);

        assert_eq!(tokens[0].content, "<details>");
        assert_eq!(tokens[1].content, "<summary>Hidden</summary>");
        assert_eq!(tokens[2].content, "body");
        assert_eq!(tokens[3].content, "</details>");
    }

    #[test]
    fn test_standard_pipeline_idempotent() {
        let mut tokens = vec![
            Token::blockquote_open(),
            Token::paragraph_open(),
            Token::inline("[!NOTE]\nBody text."),
            Token::paragraph_close(),
            Token::blockquote_close(),
        ];

        let mut pipeline = RulePipeline::standard();
        pipeline.run(&mut tokens);
        let first = tokens.clone();
        pipeline.run(&mut tokens);
        assert_eq!(tokens, first);
    }

    #[test]
    fn test_video_admonition_end_to_end() {
        let mut tokens = vec![
            Token::blockquote_open(),
            Token::paragraph_open(),
            Token::inline("[!VIDEO](https://example.com/v.mp4)"),
            Token::paragraph_close(),
            Token::blockquote_close(),
        ];

        let mut pipeline = RulePipeline::standard();
        pipeline.run(&mut tokens);

        assert_eq!(tokens[0].attr_str("class"), Some("extension video"));
        assert_eq!(tokens[1].tag, "video");
        assert_eq!(tokens[1].attr_str("src"), Some("https://example.com/v.mp4"));
        assert_eq!(tokens[1].attr("controls"), Some(&AttrValue::Bool(true)));
        assert_eq!(tokens[2].content, "");
        assert_eq!(tokens[3].tag, "video");
        assert_eq!(tokens[4].token_type, TokenType::BlockquoteClose);
    }
}
