//! Sequential site build: scan, render, write.

use std::fs;
use std::path::{Path, PathBuf};

use wsd_renderer::{BuildEnv, MarkdownRenderer, PageInfo};

use crate::app::{App, Extension};
use crate::error::BuildError;
use crate::scanner::{self, SourceDoc};
use crate::shell::render_page;

/// Where sources are read from and where pages are written.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl SiteConfig {
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Outcome of a build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Written page files, in build order.
    pub pages: Vec<PathBuf>,
    /// Files generated by directives (e.g. diagram images).
    pub artifacts: Vec<PathBuf>,
    /// Warnings from all pages, prefixed with `docname:line:`.
    pub warnings: Vec<String>,
}

/// Builds a documentation site from Markdown sources.
///
/// # Example
///
/// ```ignore
/// use wsd_site::{SiteBuilder, SiteConfig};
///
/// let mut builder = SiteBuilder::new(SiteConfig::new("docs", "build/html"))
///     .with_extension(my_extension);
/// let report = builder.build()?;
/// println!("{} pages", report.pages.len());
/// ```
#[derive(Debug)]
pub struct SiteBuilder {
    config: SiteConfig,
    app: App,
    env: BuildEnv,
    built: Vec<String>,
}

impl SiteBuilder {
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            app: App::new(),
            env: BuildEnv::new(),
            built: Vec::new(),
        }
    }

    /// Register an extension.
    #[must_use]
    pub fn with_extension<E: Extension>(mut self, extension: E) -> Self {
        tracing::debug!(extension = extension.name(), "Registering extension");
        extension.setup(&mut self.app);
        self
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Bookkeeping carried between builds.
    #[must_use]
    pub fn env(&self) -> &BuildEnv {
        &self.env
    }

    /// Build every document under the source directory.
    ///
    /// Documents are processed one at a time, in docname order. Calling
    /// `build` again rebuilds everything; records from the previous build are
    /// purged per document first.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when the source directory is missing or a
    /// source/output file cannot be read or written.
    pub fn build(&mut self) -> Result<BuildReport, BuildError> {
        let source_dir = &self.config.source_dir;
        if !source_dir.is_dir() {
            return Err(BuildError::SourceDirNotFound(source_dir.clone()));
        }

        let docs = scanner::scan(source_dir).map_err(|e| BuildError::Read {
            path: source_dir.clone(),
            source: e,
        })?;
        tracing::info!(
            source_dir = %source_dir.display(),
            document_count = docs.len(),
            "Building site"
        );

        self.purge_removed(&docs);
        self.built = docs.iter().map(|doc| doc.docname.clone()).collect();

        let mut report = BuildReport::default();
        for doc in &docs {
            let (page_path, warnings) = self.build_document(doc)?;
            report.pages.push(page_path);
            report.warnings.extend(warnings);
        }
        report.artifacts = self.env.all_artifacts().map(Path::to_path_buf).collect();

        tracing::info!(
            pages = report.pages.len(),
            artifacts = report.artifacts.len(),
            warnings = report.warnings.len(),
            "Site build completed"
        );
        Ok(report)
    }

    /// Purge documents from a previous build whose sources are gone and
    /// delete their pages.
    fn purge_removed(&mut self, docs: &[SourceDoc]) {
        let removed: Vec<String> = self
            .built
            .iter()
            .filter(|name| !docs.iter().any(|doc| doc.docname == **name))
            .cloned()
            .collect();
        for docname in removed {
            tracing::debug!(docname = %docname, "Purging removed document");
            self.app.purge_doc(&mut self.env, &docname);
            let page = PageInfo::new(
                docname.as_str(),
                &self.config.source_dir,
                &self.config.output_dir,
            );
            if let Err(e) = fs::remove_file(page.output_path())
                && e.kind() != std::io::ErrorKind::NotFound
            {
                tracing::warn!(docname = %docname, error = %e, "Failed to remove stale page");
            }
        }
    }

    fn build_document(&mut self, doc: &SourceDoc) -> Result<(PathBuf, Vec<String>), BuildError> {
        self.app.purge_doc(&mut self.env, &doc.docname);

        let markdown = fs::read_to_string(&doc.path).map_err(|e| BuildError::Read {
            path: doc.path.clone(),
            source: e,
        })?;

        let page = PageInfo::new(
            doc.docname.as_str(),
            &self.config.source_dir,
            &self.config.output_dir,
        );

        let result =
            MarkdownRenderer::new(self.app.registry_mut()).render(&markdown, &page, &mut self.env);
        for warning in &result.warnings {
            tracing::warn!(docname = %doc.docname, "{warning}");
        }

        let output_path = page.output_path();
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let html = render_page(result.title.as_deref(), &doc.docname, &result.html);
        fs::write(&output_path, html).map_err(|e| BuildError::Write {
            path: output_path.clone(),
            source: e,
        })?;

        tracing::debug!(docname = %doc.docname, path = %output_path.display(), "Page written");
        Ok((output_path, result.warnings))
    }
}
