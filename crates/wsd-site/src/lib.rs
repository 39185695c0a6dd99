//! Documentation site builder.
//!
//! Scans a source directory for Markdown files, renders each one through
//! [`wsd_renderer::MarkdownRenderer`] with the directives registered by
//! [`Extension`]s, and writes one HTML page per document.
//!
//! Documents are built strictly one after another; there is no parallelism.

mod app;
mod builder;
mod error;
mod scanner;
mod shell;

pub use app::{App, Extension, PurgeDocHook};
pub use builder::{BuildReport, SiteBuilder, SiteConfig};
pub use error::BuildError;
pub use scanner::SourceDoc;
