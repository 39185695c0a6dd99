//! Errors for a single diagram occurrence.

use std::path::PathBuf;

use wsd_client::ClientError;

/// Why a `sequencediagram` occurrence produced no output.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// The `file` option points at a file that does not exist.
    #[error("diagram source file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The source file exists but could not be read.
    #[error("failed to read diagram source {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Diagram text is empty or whitespace-only.
    #[error("diagram source is empty")]
    EmptySource,

    /// The rendering service round-trip failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The image could not be written to the build directory.
    #[error("failed to write diagram image {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Whether this is a content problem rather than an environment failure.
    ///
    /// Logged at warn level instead of error level.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::EmptySource | Self::Client(ClientError::EmptySource)
        )
    }
}
