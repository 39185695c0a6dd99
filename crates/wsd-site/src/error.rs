//! Site build errors.

use std::path::PathBuf;

/// Error that aborts a site build.
///
/// Failures inside directives are not build errors: they are logged, added
/// to the page warnings, and the build continues.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceDirNotFound(PathBuf),

    /// Failed to read a source file or directory.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file or directory.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
