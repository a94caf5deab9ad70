//! Error types for the text expansion engine.
//!
//! Token rewrite rules have no error path: an unmatched pattern is a no-op.

use std::path::PathBuf;

/// Error raised by include/snippet expansion in strict mode.
///
/// With [`throw_on_error`](crate::MarkupConfig::throw_on_error) unset
/// (the default), these conditions are rendered as inline diagnostic blocks
/// in the output document instead.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    /// An included file does not exist or could not be read.
    #[error("include file not found: {path}")]
    IncludeNotFound {
        /// Resolved path of the missing file.
        path: PathBuf,
    },

    /// Expanding an include would revisit a file already on the current
    /// inclusion path.
    #[error("circular reference: {path} is already included by {parent}")]
    CircularInclude {
        /// The file whose inclusion would close the cycle.
        path: PathBuf,
        /// The file containing the offending marker.
        parent: PathBuf,
    },

    /// A `{{name}}` reference names a snippet the snippet table does not
    /// define.
    #[error("snippet not found: {name}")]
    SnippetNotFound {
        /// The unresolved snippet name.
        name: String,
    },
}
