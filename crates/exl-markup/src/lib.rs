//! Directive rewriting and include/snippet expansion for ExL-flavored markdown.
//!
//! Documents are processed in two stages:
//!
//! 1. **Text expansion** ([`SourceExpander`]): `{{$include path}}` and
//!    `{{snippet}}` markers are substituted in the raw source text before it
//!    reaches the tokenizer. Missing files, circular includes and unknown
//!    snippets become visible inline diagnostics by default, or hard errors
//!    when [`MarkupConfig::with_throw_on_error`] is set.
//!
//! 2. **Token rewriting** ([`RulePipeline`]): a fixed sequence of single-scan
//!    rewrite passes over the parsed token stream turns `[!DNL ...]` /
//!    `[!UICONTROL ...]` markers, `[!NOTE]`-style admonitions, `[!VIDEO](url)`
//!    embeds, `{#anchor}` / `{target=...}` attributes and `+++` collapsible
//!    sections into structural markup.
//!
//! The token model lives in the `exl-token` crate; this crate mutates the
//! sequence in place and never owns the tokenizer or the renderer.
//!
//! # Example
//!
//! ```
//! use exl_markup::RulePipeline;
//! use exl_token::Token;
//!
//! let mut tokens = vec![
//!     Token::blockquote_open(),
//!     Token::paragraph_open(),
//!     Token::inline("[!NOTE]\nRemember this."),
//!     Token::paragraph_close(),
//!     Token::blockquote_close(),
//! ];
//!
//! let mut pipeline = RulePipeline::standard();
//! pipeline.run(&mut tokens);
//!
//! assert_eq!(tokens[0].attr_str("class"), Some("extension note"));
//! assert_eq!(tokens[0].attr_str("data-label"), Some("NOTE"));
//! assert_eq!(tokens[2].content, "Remember this.");
//! ```

mod config;
mod error;
pub mod expand;
pub mod rules;

pub use config::{MarkupConfig, ReadFileFn};
pub use error::ExpandError;
pub use expand::{Snippet, SnippetTable, SourceExpander};
pub use rules::{
    AdmonitionRule, BracketDirectiveRule, CollapsibleRule, HeadingAnchorRule, LinkTargetRule,
    RulePipeline, TableStyleRule, TokenRule,
};
