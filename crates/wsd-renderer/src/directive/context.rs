//! Directive processing context.
//!
//! Provides page location, build bookkeeping and diagnostics to directive
//! handlers.

use std::path::PathBuf;

use crate::env::BuildEnv;
use crate::page::PageInfo;

/// Context passed to a directive handler for one occurrence.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use wsd_renderer::directive::DirectiveContext;
/// use wsd_renderer::{BuildEnv, PageInfo};
///
/// let page = PageInfo::new("guide/setup", Path::new("docs"), Path::new("build"));
/// let mut env = BuildEnv::new();
/// let mut warnings = Vec::new();
/// let mut ctx = DirectiveContext::new(&page, 3, &mut env, &mut warnings);
///
/// assert_eq!(ctx.resolve_path("flows/login.wsd"), PathBuf::from("docs/flows/login.wsd"));
/// assert_eq!(ctx.relative_uri("_images/a.png"), "../_images/a.png");
/// assert_eq!(ctx.env.new_serialno("guide/setup", "note"), 0);
/// ```
pub struct DirectiveContext<'a> {
    /// Page being rendered.
    pub page: &'a PageInfo,
    /// Line number of the directive's opening fence (1-indexed).
    pub line: usize,
    /// Per-build bookkeeping shared by all documents.
    pub env: &'a mut BuildEnv,
    warnings: &'a mut Vec<String>,
}

impl<'a> DirectiveContext<'a> {
    #[must_use]
    pub fn new(
        page: &'a PageInfo,
        line: usize,
        env: &'a mut BuildEnv,
        warnings: &'a mut Vec<String>,
    ) -> Self {
        Self {
            page,
            line,
            env,
            warnings,
        }
    }

    /// Name of the document being rendered (e.g. `guide/setup`).
    #[must_use]
    pub fn docname(&self) -> &str {
        &self.page.docname
    }

    /// Resolve a path relative to the documentation source root.
    #[must_use]
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        self.page.source_root.join(relative)
    }

    /// Directory for binary assets in the build output.
    #[must_use]
    pub fn image_dir(&self) -> PathBuf {
        self.page.image_dir()
    }

    /// URI of an output file (relative to the output root) as seen from this page.
    #[must_use]
    pub fn relative_uri(&self, target: &str) -> String {
        self.page.relative_uri(target)
    }

    /// Record a warning for this page, prefixed with the source location.
    pub fn warn(&mut self, message: impl AsRef<str>) {
        self.warnings.push(format!(
            "{}:{}: {}",
            self.page.docname,
            self.line,
            message.as_ref()
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn page() -> PageInfo {
        PageInfo::new("index", Path::new("/src/docs"), Path::new("/out"))
    }

    #[test]
    fn test_resolve_path() {
        let page = page();
        let mut env = BuildEnv::new();
        let mut warnings = Vec::new();
        let ctx = DirectiveContext::new(&page, 1, &mut env, &mut warnings);

        assert_eq!(
            ctx.resolve_path("diagrams/flow.wsd"),
            PathBuf::from("/src/docs/diagrams/flow.wsd")
        );
    }

    #[test]
    fn test_resolve_absolute_path() {
        let page = page();
        let mut env = BuildEnv::new();
        let mut warnings = Vec::new();
        let ctx = DirectiveContext::new(&page, 1, &mut env, &mut warnings);

        // Joining absolute path replaces the base
        assert_eq!(ctx.resolve_path("/etc/flow.wsd"), PathBuf::from("/etc/flow.wsd"));
    }

    #[test]
    fn test_image_dir() {
        let page = page();
        let mut env = BuildEnv::new();
        let mut warnings = Vec::new();
        let ctx = DirectiveContext::new(&page, 1, &mut env, &mut warnings);

        assert_eq!(ctx.image_dir(), PathBuf::from("/out/_images"));
    }

    #[test]
    fn test_warn_prefixes_location() {
        let page = page();
        let mut env = BuildEnv::new();
        let mut warnings = Vec::new();
        {
            let mut ctx = DirectiveContext::new(&page, 12, &mut env, &mut warnings);
            ctx.warn("empty diagram");
        }
        assert_eq!(warnings, vec!["index:12: empty diagram".to_owned()]);
    }
}
