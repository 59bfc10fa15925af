//! Error types for package loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or loading a package.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The package path resolved to no directory under any source root.
    #[error("package not found: {0}")]
    NotFound(String),

    /// The package directory exists but contains no Go source files.
    #[error("no Go source files in {}", .0.display())]
    NoSources(PathBuf),

    /// IO failure while reading a directory or source file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
