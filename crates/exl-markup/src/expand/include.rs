//! Recursive expansion of `{{$include path}}` markers.
//!
//! The inclusion graph is traversed depth-first on demand; the ancestor list
//! for the current recursion path doubles as the cycle detector. No file may
//! appear twice among its own ancestors.

use std::path::{Component, Path, PathBuf};

use crate::config::MarkupConfig;
use crate::error::ExpandError;

/// Expand every include marker in `source`.
///
/// `root` is the directory relative paths resolve against, `parent` the file
/// whose text is being scanned (unknown for the top-level document), and
/// `ancestors` the files on the current recursion path.
pub(crate) fn expand(
    config: &MarkupConfig,
    source: &str,
    root: &Path,
    parent: Option<&Path>,
    ancestors: &mut Vec<PathBuf>,
) -> Result<String, ExpandError> {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;

    for caps in config.include_pattern.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&source[last..whole.start()]);
        last = whole.end();

        let rel = caps.get(1).map_or("", |m| m.as_str()).trim();
        let path = normalize(&root.join(rel));

        if ancestors.contains(&path) {
            let parent_path = parent.unwrap_or(root);
            tracing::warn!(
                path = %path.display(),
                parent = %parent_path.display(),
                "circular include reference"
            );
            if config.throw_on_error {
                return Err(ExpandError::CircularInclude {
                    path,
                    parent: parent_path.to_path_buf(),
                });
            }
            out.push_str(&render(&config.circular_template, &path, Some(parent_path)));
            continue;
        }

        match config.read(&path) {
            Ok(text) => {
                ancestors.push(path.clone());
                let child_root = path.parent().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                let mut expanded = expand(config, &text, &child_root, Some(&path), ancestors)?;
                ancestors.pop();

                // One trailing newline is the include's own line ending, not
                // a paragraph break in the fragment.
                if expanded.ends_with('\n') {
                    expanded.pop();
                }
                out.push_str(&expanded);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "include file not found");
                if config.throw_on_error {
                    return Err(ExpandError::IncludeNotFound { path });
                }
                out.push_str(&render(&config.not_found_template, &path, None));
            }
        }
    }

    out.push_str(&source[last..]);
    Ok(out)
}

/// Fill a diagnostic template's `{path}` / `{parent}` placeholders.
fn render(template: &str, path: &Path, parent: Option<&Path>) -> String {
    let mut message = template.replace("{path}", &path.display().to_string());
    if let Some(parent) = parent {
        message = message.replace("{parent}", &parent.display().to_string());
    }
    message
}

/// Lexically normalize a path so that `a/sub/../b.md` and `a/b.md` compare
/// equal during cycle detection. Purely textual; never touches the
/// filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io;

    fn config_with(files: &[(&str, &str)]) -> MarkupConfig {
        let map: HashMap<String, String> = files
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        MarkupConfig::new().with_root("/docs").with_read_file(move |path| {
            map.get(&path.display().to_string())
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        })
    }

    fn run(config: &MarkupConfig, source: &str) -> Result<String, ExpandError> {
        let mut ancestors = Vec::new();
        expand(config, source, &config.root, None, &mut ancestors)
    }

    #[test]
    fn test_simple_include() {
        let config = config_with(&[("/docs/a.md", "included text\n")]);
        let out = run(&config, "before {{$include a.md}} after").unwrap();
        assert_eq!(out, "before included text after");
    }

    #[test]
    fn test_nested_include_resolves_against_own_dir() {
        let config = config_with(&[
            ("/docs/sub/outer.md", "outer({{$include inner.md}})\n"),
            ("/docs/sub/inner.md", "inner\n"),
        ]);
        let out = run(&config, "{{$include sub/outer.md}}").unwrap();
        assert_eq!(out, "outer(inner)");
    }

    #[test]
    fn test_trims_exactly_one_trailing_newline() {
        let config = config_with(&[("/docs/a.md", "fragment\n\n")]);
        let out = run(&config, "{{$include a.md}}|").unwrap();
        assert_eq!(out, "fragment\n|");

        let config = config_with(&[("/docs/a.md", "no newline")]);
        let out = run(&config, "{{$include a.md}}|").unwrap();
        assert_eq!(out, "no newline|");
    }

    #[test]
    fn test_missing_file_inline_diagnostic() {
        let config = config_with(&[]);
        let out = run(&config, "start {{$include missing.md}} end").unwrap();
        assert!(out.contains("Include file not found: /docs/missing.md"));
        assert!(out.starts_with("start "));
        assert!(out.ends_with(" end"));
    }

    #[test]
    fn test_missing_file_strict_mode() {
        let config = config_with(&[]).with_throw_on_error(true);
        let err = run(&config, "{{$include missing.md}}").unwrap_err();
        match err {
            ExpandError::IncludeNotFound { path } => {
                assert_eq!(path, PathBuf::from("/docs/missing.md"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_does_not_abort_later_markers() {
        let config = config_with(&[("/docs/b.md", "B\n")]);
        let out = run(&config, "{{$include missing.md}} {{$include b.md}}").unwrap();
        assert!(out.contains("Include file not found"));
        assert!(out.ends_with(" B"));
    }

    #[test]
    fn test_mutual_inclusion_terminates() {
        let config = config_with(&[
            ("/docs/a.md", "A starts {{$include b.md}}\n"),
            ("/docs/b.md", "B starts {{$include a.md}}\n"),
        ]);
        let out = run(&config, "{{$include a.md}}").unwrap();
        assert!(out.contains("A starts"));
        assert!(out.contains("B starts"));
        assert!(out.contains("Circular reference: /docs/a.md is already included by /docs/b.md"));
    }

    #[test]
    fn test_self_inclusion_terminates() {
        let config = config_with(&[("/docs/a.md", "self {{$include a.md}}\n")]);
        let out = run(&config, "{{$include a.md}}").unwrap();
        assert!(out.contains("Circular reference: /docs/a.md is already included by /docs/a.md"));
    }

    #[test]
    fn test_circular_strict_mode() {
        let config = config_with(&[
            ("/docs/a.md", "{{$include b.md}}\n"),
            ("/docs/b.md", "{{$include a.md}}\n"),
        ])
        .with_throw_on_error(true);
        let err = run(&config, "{{$include a.md}}").unwrap_err();
        match err {
            ExpandError::CircularInclude { path, parent } => {
                assert_eq!(path, PathBuf::from("/docs/a.md"));
                assert_eq!(parent, PathBuf::from("/docs/b.md"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_non_circular_include_allowed() {
        // The same fragment twice in sequence is not a cycle.
        let config = config_with(&[("/docs/a.md", "X\n")]);
        let out = run(&config, "{{$include a.md}} {{$include a.md}}").unwrap();
        assert_eq!(out, "X X");
    }

    #[test]
    fn test_parent_relative_path_normalized() {
        let config = config_with(&[
            ("/docs/sub/outer.md", "{{$include ../top.md}}\n"),
            ("/docs/top.md", "top\n"),
        ]);
        let out = run(&config, "{{$include sub/outer.md}}").unwrap();
        assert_eq!(out, "top");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/../c.md")), PathBuf::from("/a/c.md"));
        assert_eq!(normalize(Path::new("/a/./b.md")), PathBuf::from("/a/b.md"));
        assert_eq!(normalize(Path::new("../x.md")), PathBuf::from("../x.md"));
        assert_eq!(normalize(Path::new("/../x.md")), PathBuf::from("/x.md"));
    }

    #[test]
    fn test_real_filesystem_include() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("part.md"), "from disk\n").unwrap();

        let config = MarkupConfig::new().with_root(dir.path());
        let out = run(&config, "{{$include part.md}}").unwrap();
        assert_eq!(out, "from disk");
    }
}
