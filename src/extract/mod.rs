//! # Extraction
//!
//! The heart of typeprune: a work-list driver that expands requested types
//! into their full transitive closure of referenced types, across package
//! and module boundaries.
//!
//! Same-package references are resolved synchronously the moment the walker
//! encounters them; cross-package references are queued, since resolving
//! them means loading another package, a cost deferred to the driver loop.
//! A processed set checked on every pop guarantees cyclic type graphs
//! terminate.

mod driver;
mod error;
mod imports;
mod record;
mod walker;

pub use driver::{ExtractOptions, Extractor, Summary, TypeRequest};
pub use error::ExtractError;
pub use imports::is_mangled_alias;
pub use record::{DeclRecord, PackageRecord};

use crate::config::ExtractConfig;
use std::path::PathBuf;

/// Run a whole extraction batch described by a configuration file: one
/// shared closure over every requested (package, type) pair, one emission
/// pass, one manifest patch.
pub fn run_config(config: &ExtractConfig) -> Result<Summary, ExtractError> {
    config.validate()?;

    let roots = if config.roots.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        config.roots.iter().map(PathBuf::from).collect()
    };
    let options = ExtractOptions {
        output_dir: PathBuf::from(&config.output),
        roots,
        manifest_dir: None,
    };

    let requests: Vec<TypeRequest> = config
        .packages
        .iter()
        .flat_map(|entry| {
            entry.types.iter().map(|name| TypeRequest {
                package: entry.package.clone(),
                type_name: name.clone(),
            })
        })
        .collect();

    Extractor::new(options).run(&requests)
}
