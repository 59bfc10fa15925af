//! Module discovery: mapping module paths to their source directories.

use super::error::LoadError;
use std::path::{Path, PathBuf};

/// One dependency module and the package paths discovered under it.
///
/// The module is the unit that receives a generated manifest and a redirect
/// entry, so the registry decides post-walk which manifests to synthesize.
#[derive(Debug, Clone)]
pub struct ModuleRecord {
    pub path: String,
    pub packages: Vec<String>,
}

/// Index of `go.mod` manifests found under the source roots.
#[derive(Debug, Default)]
pub struct ModuleIndex {
    /// (module path, module root directory)
    entries: Vec<(String, PathBuf)>,
}

impl ModuleIndex {
    /// Scan the given roots recursively for `go.mod` files.
    pub fn scan(roots: &[PathBuf]) -> Result<Self, LoadError> {
        let mut index = Self::default();
        for root in roots {
            if root.is_dir() {
                index.scan_dir(root)?;
            }
        }
        tracing::debug!(modules = index.entries.len(), "scanned source roots");
        Ok(index)
    }

    fn scan_dir(&mut self, dir: &Path) -> Result<(), LoadError> {
        let manifest = dir.join("go.mod");
        if manifest.is_file() {
            match std::fs::read_to_string(&manifest) {
                Ok(text) => {
                    if let Some(module_path) = parse_module_line(&text) {
                        self.entries.push((module_path, dir.to_path_buf()));
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %manifest.display(), error = %e, "unreadable go.mod");
                }
            }
        }

        let entries =
            std::fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| LoadError::io(dir, e))?;
            let path = entry.path();
            if path.is_dir() {
                // Hidden directories (.git and friends) hold no packages.
                let hidden = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with('.'));
                if !hidden {
                    // Unreadable subtrees cannot hold loadable packages
                    // either; skip them like an unreadable go.mod.
                    if let Err(e) = self.scan_dir(&path) {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "skipping unreadable directory"
                        );
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve a package path to `(package directory, owning module path)`
    /// using the longest module-path prefix.
    pub fn locate(&self, package_path: &str) -> Option<(PathBuf, String)> {
        let mut best: Option<&(String, PathBuf)> = None;
        for entry in &self.entries {
            let (module, _) = entry;
            let matches = package_path == module
                || package_path
                    .strip_prefix(module.as_str())
                    .is_some_and(|rest| rest.starts_with('/'));
            if matches && best.is_none_or(|(m, _)| module.len() > m.len()) {
                best = Some(entry);
            }
        }
        let (module, dir) = best?;
        let rest = package_path[module.len()..].trim_start_matches('/');
        let pkg_dir = if rest.is_empty() {
            dir.clone()
        } else {
            dir.join(rest)
        };
        pkg_dir.is_dir().then(|| (pkg_dir, module.clone()))
    }
}

/// Extract the module path from `module <path>` in go.mod text.
pub(crate) fn parse_module_line(text: &str) -> Option<String> {
    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("module") {
            if rest.starts_with([' ', '\t']) {
                let rest = rest.trim();
                if !rest.is_empty() {
                    return Some(rest.trim_matches('"').to_string());
                }
            }
        }
    }
    None
}
