//! Package loading with caching and module registry population.

use super::error::LoadError;
use super::modules::{ModuleIndex, ModuleRecord};
use crate::parser;
use crate::syntax::{SourceFile, TypeDecl};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::path::PathBuf;
use std::sync::Arc;

/// One parsed source file of a package.
#[derive(Debug)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub text: String,
    pub ast: SourceFile,
}

/// A fully loaded package: parsed files plus a type-name index.
///
/// Only type declarations are indexed, which is what lets an identifier be
/// classified as a type name rather than a value or function sharing the
/// package scope.
#[derive(Debug)]
pub struct LoadedPackage {
    pub path: String,
    /// Name from the package clause.
    pub name: SmolStr,
    pub module_path: String,
    pub files: Vec<SourceUnit>,
    /// type name -> (file index, decl index)
    types: FxHashMap<SmolStr, (usize, usize)>,
}

impl LoadedPackage {
    /// Look up a type declaration by name, with the index of its file.
    pub fn find_type(&self, name: &str) -> Option<(usize, &TypeDecl)> {
        let &(file, decl) = self.types.get(name)?;
        Some((file, &self.files[file].ast.types[decl]))
    }

    pub fn declares_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}

/// Loads packages by import path, caching by path.
///
/// `load` is idempotent: repeat calls for the same path return the cached
/// package. Loading a package registers it under its owning module; when no
/// `go.mod` governs the package directory, the package path doubles as its
/// own module path, a degraded but safe default.
pub struct PackageLoader {
    roots: Vec<PathBuf>,
    index: Option<ModuleIndex>,
    cache: FxHashMap<String, Arc<LoadedPackage>>,
    registry: IndexMap<String, ModuleRecord>,
}

impl PackageLoader {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            index: None,
            cache: FxHashMap::default(),
            registry: IndexMap::new(),
        }
    }

    /// Modules encountered so far, in load order.
    pub fn modules(&self) -> &IndexMap<String, ModuleRecord> {
        &self.registry
    }

    /// Load a package's syntax by import path.
    pub fn load(&mut self, package_path: &str) -> Result<Arc<LoadedPackage>, LoadError> {
        if let Some(pkg) = self.cache.get(package_path) {
            return Ok(pkg.clone());
        }

        let (dir, module_path) = self.locate(package_path)?;
        let pkg = Arc::new(self.read_package(package_path, dir, module_path)?);

        self.registry
            .entry(pkg.module_path.clone())
            .or_insert_with(|| ModuleRecord {
                path: pkg.module_path.clone(),
                packages: Vec::new(),
            })
            .packages
            .push(package_path.to_string());

        self.cache.insert(package_path.to_string(), pkg.clone());
        Ok(pkg)
    }

    fn locate(&mut self, package_path: &str) -> Result<(PathBuf, String), LoadError> {
        if self.index.is_none() {
            self.index = Some(ModuleIndex::scan(&self.roots)?);
        }
        if let Some(found) = self
            .index
            .as_ref()
            .and_then(|i| i.locate(package_path))
        {
            return Ok(found);
        }

        // GOPATH/vendor-style layout: the package path joined directly under
        // a root, with no manifest in sight.
        for root in &self.roots {
            let dir = root.join(package_path);
            if dir.is_dir() {
                return Ok((dir, package_path.to_string()));
            }
        }
        Err(LoadError::NotFound(package_path.to_string()))
    }

    fn read_package(
        &self,
        package_path: &str,
        dir: PathBuf,
        module_path: String,
    ) -> Result<LoadedPackage, LoadError> {
        let mut file_paths = Vec::new();
        let entries = std::fs::read_dir(&dir).map_err(|e| LoadError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| LoadError::io(&dir, e))?;
            let path = entry.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(n) => n,
                None => continue,
            };
            if path.is_file() && name.ends_with(".go") && !name.ends_with("_test.go") {
                file_paths.push(path);
            }
        }
        if file_paths.is_empty() {
            return Err(LoadError::NoSources(dir));
        }
        // Deterministic load order regardless of directory enumeration.
        file_paths.sort();

        let mut files = Vec::with_capacity(file_paths.len());
        let mut name = SmolStr::default();
        let mut types: FxHashMap<SmolStr, (usize, usize)> = FxHashMap::default();

        for path in file_paths {
            let text =
                std::fs::read_to_string(&path).map_err(|e| LoadError::io(&path, e))?;
            let parsed = parser::parse(&text);
            if !parsed.ok() {
                // Best effort: broken code elsewhere in the file does not
                // invalidate the type declarations we did recover.
                tracing::warn!(
                    path = %path.display(),
                    errors = parsed.errors.len(),
                    first = %parsed.errors[0].message,
                    "syntax errors while loading package"
                );
            }
            let ast = parsed.file;
            if name.is_empty() && !ast.package_name.is_empty() {
                name = ast.package_name.clone();
            }
            let file_idx = files.len();
            for (decl_idx, decl) in ast.types.iter().enumerate() {
                types.entry(decl.name.clone()).or_insert((file_idx, decl_idx));
            }
            files.push(SourceUnit { path, text, ast });
        }

        if name.is_empty() {
            name = SmolStr::new(crate::base::final_segment(package_path));
        }

        tracing::debug!(
            path = package_path,
            module = %module_path,
            files = files.len(),
            types = types.len(),
            "loaded package"
        );

        Ok(LoadedPackage {
            path: package_path.to_string(),
            name,
            module_path,
            files,
            types,
        })
    }
}
