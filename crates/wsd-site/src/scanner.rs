//! Source document discovery by filesystem walking.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A Markdown source file found under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDoc {
    /// Document name (e.g. "index", "guide/setup").
    pub docname: String,
    /// Path to the `.md` file.
    pub path: PathBuf,
}

/// Collect every `.md` file under `source_dir`, sorted by docname.
///
/// Hidden files and directories (names starting with `.`) are skipped.
pub(crate) fn scan(source_dir: &Path) -> io::Result<Vec<SourceDoc>> {
    let mut docs = Vec::new();
    scan_directory(source_dir, "", &mut docs)?;
    docs.sort_by(|a, b| a.docname.cmp(&b.docname));
    Ok(docs)
}

fn scan_directory(dir: &Path, prefix: &str, docs: &mut Vec<SourceDoc>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            scan_directory(&path, &join_docname(prefix, &name), docs)?;
        } else if let Some(stem) = name.strip_suffix(".md") {
            docs.push(SourceDoc {
                docname: join_docname(prefix, stem),
                path,
            });
        }
    }
    Ok(())
}

fn join_docname(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn docnames(docs: &[SourceDoc]) -> Vec<&str> {
        docs.iter().map(|d| d.docname.as_str()).collect()
    }

    #[test]
    fn test_scan_nested_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("guide/advanced")).unwrap();
        fs::write(root.join("index.md"), "# Home").unwrap();
        fs::write(root.join("guide/setup.md"), "# Setup").unwrap();
        fs::write(root.join("guide/advanced/tuning.md"), "# Tuning").unwrap();
        fs::write(root.join("about.md"), "# About").unwrap();

        let docs = scan(root).unwrap();

        assert_eq!(
            docnames(&docs),
            vec!["about", "guide/advanced/tuning", "guide/setup", "index"]
        );
        assert_eq!(docs[3].path, root.join("index.md"));
    }

    #[test]
    fn test_scan_skips_hidden_and_non_markdown() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(".git/notes.md"), "hidden").unwrap();
        fs::write(root.join(".draft.md"), "hidden").unwrap();
        fs::write(root.join("flow.wsd"), "A->B: hi").unwrap();
        fs::write(root.join("index.md"), "# Home").unwrap();

        let docs = scan(root).unwrap();

        assert_eq!(docnames(&docs), vec!["index"]);
    }

    #[test]
    fn test_scan_missing_dir_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(scan(&temp.path().join("missing")).is_err());
    }
}
