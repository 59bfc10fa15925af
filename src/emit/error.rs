//! Error types for output emission.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing generated output.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EmitError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
