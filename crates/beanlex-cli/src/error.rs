//! The CLI's own error type, turning I/O and library errors into exit codes.

use std::path::PathBuf;

/// Errors the `beanlex` binary can report directly (as opposed to parse
/// diagnostics, which are rendered via [`crate::report`] and don't abort the
/// run).
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The input file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
}
