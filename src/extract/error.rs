//! Error types for extraction runs.

use crate::config::ConfigError;
use crate::emit::EmitError;
use crate::project::LoadError;
use thiserror::Error;

/// Errors that abort an extraction run.
///
/// Manifest-patching problems are deliberately absent: they are downgraded
/// to warnings, since generated code remains usable without the consumer's
/// manifest being rewritten.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A package in the closure could not be located or read. Fatal even
    /// mid-walk: a missing dependency breaks correctness of the closure.
    #[error("failed to load package {path}")]
    Load {
        path: String,
        #[source]
        source: LoadError,
    },

    /// A requested or referenced type is absent from its claimed package.
    /// Never skipped silently: a dropped type would yield an incomplete
    /// extraction.
    #[error("type {name} not found in package {package}")]
    TypeNotFound { package: String, name: String },

    /// Failure while writing generated sources or module manifests.
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// Malformed or incomplete run configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
