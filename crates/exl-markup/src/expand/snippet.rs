//! Snippet table construction and `{{name}}` expansion.
//!
//! Snippets are defined in a single delimited file. A header line
//! (`## Label {#name}`) starts a new snippet; every following line is content
//! until the next header. Lines before the first header are ignored.

use std::collections::BTreeMap;

use regex::Regex;

use crate::config::MarkupConfig;
use crate::error::ExpandError;

const MISSING_SNIPPET_TEMPLATE: &str =
    r#"<div class="extension error" data-label="Error">Snippet not found: {name}</div>"#;

/// A named, reusable block of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Reference name, unique within the table.
    pub name: String,
    /// Display label from the header line.
    pub label: String,
    /// Accumulated content lines, joined with `\n`.
    pub content: String,
}

/// Mapping from snippet name to definition, built once per session.
#[derive(Debug, Default)]
pub struct SnippetTable {
    entries: BTreeMap<String, Snippet>,
}

impl SnippetTable {
    /// Load the table from the configured snippet file.
    ///
    /// An unreadable snippet file yields an empty table; every reference will
    /// then resolve to a missing-snippet diagnostic.
    #[must_use]
    pub fn load(config: &MarkupConfig) -> Self {
        let path = config.snippet_path();
        match config.read(&path) {
            Ok(text) => {
                let table = Self::parse(&text, &config.snippet_header_pattern);
                tracing::debug!(
                    path = %path.display(),
                    snippets = table.len(),
                    "loaded snippet table"
                );
                table
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read snippet file");
                Self::default()
            }
        }
    }

    /// Parse snippet definitions from raw text.
    #[must_use]
    pub fn parse(text: &str, header_pattern: &Regex) -> Self {
        let mut entries = BTreeMap::new();
        let mut current: Option<(String, String, Vec<&str>)> = None;

        for line in text.lines() {
            if let Some(caps) = header_pattern.captures(line) {
                if let Some((name, label, lines)) = current.take() {
                    entries.insert(name.clone(), assemble(name, label, &lines));
                }
                current = Some((caps[2].to_owned(), caps[1].to_owned(), Vec::new()));
            } else if let Some((_, _, lines)) = current.as_mut() {
                lines.push(line);
            } else {
                tracing::debug!(line, "ignoring line before first snippet header");
            }
        }
        if let Some((name, label, lines)) = current.take() {
            entries.insert(name.clone(), assemble(name, label, &lines));
        }

        Self { entries }
    }

    /// Look up a snippet by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Snippet> {
        self.entries.get(name)
    }

    /// Number of defined snippets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no snippets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build a [`Snippet`] from accumulated lines, dropping blank lines that only
/// separate the header from the content.
fn assemble(name: String, label: String, lines: &[&str]) -> Snippet {
    let content = lines.join("\n").trim_matches('\n').to_owned();
    Snippet {
        name,
        label,
        content,
    }
}

/// Expand every `{{name}}` marker in `source` from the table.
pub(crate) fn expand(
    config: &MarkupConfig,
    table: &SnippetTable,
    source: &str,
) -> Result<String, ExpandError> {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;

    for caps in config.snippet_pattern.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        let name = caps.get(1).map_or("", |m| m.as_str());
        out.push_str(&source[last..whole.start()]);
        last = whole.end();

        match table.get(name) {
            Some(snippet) => out.push_str(&snippet.content),
            None => {
                tracing::warn!(name, "unknown snippet reference");
                if config.throw_on_error {
                    return Err(ExpandError::SnippetNotFound {
                        name: name.to_owned(),
                    });
                }
                out.push_str(&MISSING_SNIPPET_TEMPLATE.replace("{name}", name));
            }
        }
    }

    out.push_str(&source[last..]);
    Ok(out)
}
