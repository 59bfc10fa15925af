//! Redirecting generated modules in the consumer's go.mod.

use super::modfile::{GoMod, ManifestError, find_go_mod};
use std::path::Path;

/// Replace the consumer manifest's redirect section wholesale: drop every
/// existing replace directive, then add one per generated module pointing at
/// its local copy under `output_dir`.
pub fn patch_replaces(
    start_dir: &Path,
    output_dir: &Path,
    modules: &[String],
) -> Result<usize, ManifestError> {
    let manifest =
        find_go_mod(start_dir).ok_or_else(|| ManifestError::NotFound(start_dir.to_path_buf()))?;
    let mut gomod = GoMod::open(&manifest)?;

    let existing = gomod.replaces();
    if !existing.is_empty() {
        tracing::info!(count = existing.len(), "removing existing replace directives");
    }
    gomod.drop_all_replaces();

    for module_path in modules {
        let local = output_dir.join(module_path);
        let mut redirect = local.to_string_lossy().into_owned();
        // go.mod wants local redirects to look like filesystem paths.
        if !local.is_absolute() && !redirect.starts_with('.') {
            redirect = format!("./{redirect}");
        }
        gomod.add_replace(module_path, &redirect);
        tracing::debug!(module = %module_path, path = %redirect, "added replace directive");
    }

    gomod.save()?;
    Ok(modules.len())
}
