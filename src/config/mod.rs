//! Run configuration loaded from a YAML file.
//!
//! ```yaml
//! output: ./generated
//! roots:
//!   - ./vendor
//! packages:
//!   - package: github.com/argoproj/argo-cd/v3/pkg/apis/application/v1alpha1
//!     types:
//!       - Application
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors raised before any extraction begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    /// Output directory for generated code.
    pub output: String,
    /// Source roots scanned for modules and packages. Defaults to the
    /// current directory when empty.
    #[serde(default)]
    pub roots: Vec<String>,
    /// Packages and the types to extract from each.
    #[serde(default)]
    pub packages: Vec<PackageEntry>,
}

/// One package and its types to extract.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageEntry {
    pub package: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl ExtractConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is complete enough to run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.is_empty() {
            return Err(ConfigError::Invalid(
                "output directory is required".to_string(),
            ));
        }
        if self.packages.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one package entry is required".to_string(),
            ));
        }
        for (i, entry) in self.packages.iter().enumerate() {
            if entry.package.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "package path is required for entry {i}"
                )));
            }
            if entry.types.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "at least one type is required for package {}",
                    entry.package
                )));
            }
        }
        Ok(())
    }
}
