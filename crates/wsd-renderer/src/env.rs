//! Per-build bookkeeping shared by directive handlers.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// State that lives for one documentation build.
///
/// Holds per-document serial numbers, the identifiers issued so far (used
/// to keep identifiers unique across documents), and the files generated for
/// each document so they can be cleaned up when the document is rebuilt.
#[derive(Debug, Default)]
pub struct BuildEnv {
    serials: HashMap<(String, String), usize>,
    ids: HashMap<String, String>,
    artifacts: BTreeMap<String, Vec<PathBuf>>,
}

impl BuildEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next serial number for `category` within `docname`.
    ///
    /// Numbering starts at 0 for every document and category.
    pub fn new_serialno(&mut self, docname: &str, category: &str) -> usize {
        let counter = self
            .serials
            .entry((docname.to_owned(), category.to_owned()))
            .or_insert(0);
        let serial = *counter;
        *counter += 1;
        serial
    }

    /// Reserve `candidate` as an identifier for `docname`.
    ///
    /// Returns `candidate` itself when it has not been issued yet, otherwise
    /// the first free `<candidate>-<n>` (n = 2, 3, ...). Identifiers are
    /// released by [`purge_doc`](Self::purge_doc).
    pub fn claim_id(&mut self, docname: &str, candidate: &str) -> String {
        let mut id = candidate.to_owned();
        let mut n = 2;
        while self.ids.contains_key(&id) {
            id = format!("{candidate}-{n}");
            n += 1;
        }
        self.ids.insert(id.clone(), docname.to_owned());
        id
    }

    /// Remember a file generated while rendering `docname`.
    pub fn record_artifact(&mut self, docname: &str, path: impl Into<PathBuf>) {
        self.artifacts
            .entry(docname.to_owned())
            .or_default()
            .push(path.into());
    }

    /// Files generated for `docname` so far.
    #[must_use]
    pub fn artifacts(&self, docname: &str) -> &[PathBuf] {
        self.artifacts.get(docname).map_or(&[], Vec::as_slice)
    }

    /// All generated files, grouped by document name order.
    pub fn all_artifacts(&self) -> impl Iterator<Item = &Path> {
        self.artifacts.values().flatten().map(PathBuf::as_path)
    }

    /// Forget everything recorded for `docname`.
    ///
    /// Resets its serial numbers, releases its identifiers, and returns the files that had been recorded
    /// for it, so the caller can delete stale outputs.
    pub fn purge_doc(&mut self, docname: &str) -> Vec<PathBuf> {
        self.serials.retain(|(doc, _), _| doc != docname);
        self.ids.retain(|_, doc| doc != docname);
        self.artifacts.remove(docname).unwrap_or_default()
    }
}
