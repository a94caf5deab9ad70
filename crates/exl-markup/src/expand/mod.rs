//! Pre-parse text expansion of include and snippet markers.
//!
//! Runs strictly before tokenization: `{{$include path}}` markers are
//! replaced by the (recursively expanded) contents of the referenced file,
//! then `{{name}}` markers are replaced from the snippet table. The result is
//! final source text ready for the tokenizer.

mod include;
mod snippet;

pub use snippet::{Snippet, SnippetTable};

use crate::config::MarkupConfig;
use crate::error::ExpandError;

/// Expansion session for one document.
///
/// Owns the configuration and the lazily built snippet table. The table is
/// loaded on the first `{{name}}` reference and cached for the remainder of
/// the session; create a fresh expander per document to avoid cross-document
/// interference.
///
/// # Example
///
/// ```
/// use exl_markup::{MarkupConfig, SourceExpander};
///
/// let config = MarkupConfig::new().with_read_file(|path| {
///     match path.to_str() {
///         Some("intro.md") => Ok("Welcome.".to_owned()),
///         _ => Err(std::io::Error::from(std::io::ErrorKind::NotFound)),
///     }
/// });
///
/// let mut expander = SourceExpander::new(config);
/// let output = expander.expand("{{$include intro.md}}\n\nBody.").unwrap();
/// assert_eq!(output, "Welcome.\n\nBody.");
/// ```
pub struct SourceExpander {
    config: MarkupConfig,
    snippets: Option<SnippetTable>,
}

impl SourceExpander {
    /// Create an expansion session with the given configuration.
    #[must_use]
    pub fn new(config: MarkupConfig) -> Self {
        Self {
            config,
            snippets: None,
        }
    }

    /// Access the session configuration.
    #[must_use]
    pub fn config(&self) -> &MarkupConfig {
        &self.config
    }

    /// Expand all include and snippet markers in `source`.
    ///
    /// In the default best-effort mode the returned text may contain inline
    /// diagnostic blocks for markers that could not be resolved. In strict
    /// mode ([`MarkupConfig::with_throw_on_error`]) the first such condition
    /// aborts with an [`ExpandError`].
    pub fn expand(&mut self, source: &str) -> Result<String, ExpandError> {
        let mut ancestors = Vec::new();
        let text = include::expand(&self.config, source, &self.config.root, None, &mut ancestors)?;

        if !self.config.snippet_pattern.is_match(&text) {
            return Ok(text);
        }

        let table = self
            .snippets
            .get_or_insert_with(|| SnippetTable::load(&self.config));
        snippet::expand(&self.config, table, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io;
    use std::path::Path;

    fn fake_fs(files: &[(&str, &str)]) -> impl Fn(&Path) -> io::Result<String> + Send + use<> {
        let map: HashMap<String, String> = files
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |path: &Path| {
            map.get(&path.display().to_string())
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }

    #[test]
    fn test_include_then_snippet_expansion() {
        let config = MarkupConfig::new()
            .with_root("/docs")
            .with_read_file(fake_fs(&[
                ("/docs/part.md", "Part with {{greeting}}.\n"),
                ("/docs/snippets.md", "## Greeting {#greeting}\nhello"),
            ]));

        let mut expander = SourceExpander::new(config);
        let output = expander.expand("Start\n{{$include part.md}}\nEnd").unwrap();
        assert_eq!(output, "Start\nPart with hello.\nEnd");
    }

    #[test]
    fn test_snippet_table_cached_per_session() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let reads = Arc::new(AtomicUsize::new(0));
        let reads_in_cb = Arc::clone(&reads);
        let config = MarkupConfig::new().with_root("/docs").with_read_file(move |path| {
            if path == Path::new("/docs/snippets.md") {
                reads_in_cb.fetch_add(1, Ordering::SeqCst);
                Ok("## Greeting {#greeting}\nhello".to_owned())
            } else {
                Err(io::Error::from(io::ErrorKind::NotFound))
            }
        });

        let mut expander = SourceExpander::new(config);
        expander.expand("{{greeting}}").unwrap();
        expander.expand("{{greeting}} again {{greeting}}").unwrap();
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_no_markers_is_identity() {
        let mut expander = SourceExpander::new(MarkupConfig::new());
        let source = "# Plain document\n\nNothing to expand here.\n";
        assert_eq!(expander.expand(source).unwrap(), source);
    }
}
