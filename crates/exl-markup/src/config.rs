//! Configuration for the expansion engine and rewrite rules.

use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;

/// Type alias for the file reading callback function.
pub type ReadFileFn = dyn Fn(&Path) -> io::Result<String> + Send;

/// Default pattern for `{{$include path}}` markers.
const DEFAULT_INCLUDE_PATTERN: &str = r"\{\{\s*\$include\s+([^}]+?)\s*\}\}";

/// Default pattern for `{{name}}` snippet references. The leading letter
/// requirement keeps it from colliding with `{{$include ...}}`.
const DEFAULT_SNIPPET_PATTERN: &str = r"\{\{\s*([A-Za-z][A-Za-z0-9_-]*)\s*\}\}";

/// Default pattern for snippet header lines: `## Label {#name}`.
const DEFAULT_SNIPPET_HEADER_PATTERN: &str = r"^#+\s*(.*?)\s*\{#([^}]+)\}\s*$";

const DEFAULT_NOT_FOUND_TEMPLATE: &str =
    r#"<div class="extension error" data-label="Error">Include file not found: {path}</div>"#;

const DEFAULT_CIRCULAR_TEMPLATE: &str = r#"<div class="extension error" data-label="Error">Circular reference: {path} is already included by {parent}</div>"#;

/// Configuration for [`SourceExpander`](crate::SourceExpander) and the
/// collapsible rewrite rule.
///
/// Built with chained `with_*` methods:
///
/// ```
/// use exl_markup::MarkupConfig;
///
/// let config = MarkupConfig::new()
///     .with_root("/docs")
///     .with_snippet_file("help/_includes/snippets.md")
///     .with_throw_on_error(true);
///
/// assert!(config.throw_on_error);
/// ```
pub struct MarkupConfig {
    /// Base directory for resolving `{{$include ...}}` paths.
    pub root: PathBuf,
    /// Path to the snippet definition file. Relative paths are resolved
    /// against [`root`](Self::root).
    pub snippet_file: PathBuf,
    /// Pattern matching include markers; capture group 1 is the relative path.
    pub include_pattern: Regex,
    /// Pattern matching snippet references; capture group 1 is the name.
    pub snippet_pattern: Regex,
    /// Pattern matching snippet header lines; capture group 1 is the display
    /// label, group 2 the snippet name.
    pub snippet_header_pattern: Regex,
    /// Sentinel prefix opening and closing collapsible sections.
    pub collapsible_prefix: String,
    /// When `true`, missing files, circular includes and unknown snippets
    /// abort expansion with an [`ExpandError`](crate::ExpandError) instead of
    /// being rendered as inline diagnostics.
    pub throw_on_error: bool,
    /// Inline diagnostic for a missing include file. `{path}` is replaced
    /// with the resolved path.
    pub not_found_template: String,
    /// Inline diagnostic for a circular include. `{path}` and `{parent}` are
    /// replaced with the offending file and its including parent.
    pub circular_template: String,
    /// Callback to read files from the file system.
    ///
    /// Default: `std::fs::read_to_string`
    pub read_file: Option<Box<ReadFileFn>>,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("."),
            snippet_file: PathBuf::from("snippets.md"),
            include_pattern: Regex::new(DEFAULT_INCLUDE_PATTERN).unwrap(),
            snippet_pattern: Regex::new(DEFAULT_SNIPPET_PATTERN).unwrap(),
            snippet_header_pattern: Regex::new(DEFAULT_SNIPPET_HEADER_PATTERN).unwrap(),
            collapsible_prefix: "+++".to_owned(),
            throw_on_error: false,
            not_found_template: DEFAULT_NOT_FOUND_TEMPLATE.to_owned(),
            circular_template: DEFAULT_CIRCULAR_TEMPLATE.to_owned(),
            read_file: None,
        }
    }

    /// Set the base directory for resolving include paths.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the snippet definition file path.
    #[must_use]
    pub fn with_snippet_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.snippet_file = path.into();
        self
    }

    /// Set the include marker pattern.
    #[must_use]
    pub fn with_include_pattern(mut self, pattern: Regex) -> Self {
        self.include_pattern = pattern;
        self
    }

    /// Set the snippet reference pattern.
    #[must_use]
    pub fn with_snippet_pattern(mut self, pattern: Regex) -> Self {
        self.snippet_pattern = pattern;
        self
    }

    /// Set the snippet header line pattern.
    #[must_use]
    pub fn with_snippet_header_pattern(mut self, pattern: Regex) -> Self {
        self.snippet_header_pattern = pattern;
        self
    }

    /// Set the collapsible section sentinel prefix.
    #[must_use]
    pub fn with_collapsible_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.collapsible_prefix = prefix.into();
        self
    }

    /// Set whether expansion errors abort processing.
    #[must_use]
    pub fn with_throw_on_error(mut self, throw_on_error: bool) -> Self {
        self.throw_on_error = throw_on_error;
        self
    }

    /// Set the inline diagnostic template for missing include files.
    #[must_use]
    pub fn with_not_found_template(mut self, template: impl Into<String>) -> Self {
        self.not_found_template = template.into();
        self
    }

    /// Set the inline diagnostic template for circular includes.
    #[must_use]
    pub fn with_circular_template(mut self, template: impl Into<String>) -> Self {
        self.circular_template = template.into();
        self
    }

    /// Set the file reading callback.
    #[must_use]
    pub fn with_read_file<F>(mut self, read_file: F) -> Self
    where
        F: Fn(&Path) -> io::Result<String> + Send + 'static,
    {
        self.read_file = Some(Box::new(read_file));
        self
    }

    /// Read a file through the configured callback.
    pub(crate) fn read(&self, path: &Path) -> io::Result<String> {
        match &self.read_file {
            Some(read_file) => read_file(path),
            None => std::fs::read_to_string(path),
        }
    }

    /// Resolve the snippet file path against the root directory.
    pub(crate) fn snippet_path(&self) -> PathBuf {
        if self.snippet_file.is_absolute() {
            self.snippet_file.clone()
        } else {
            self.root.join(&self.snippet_file)
        }
    }
}
