//! Per-package extraction state.

use super::imports;
use crate::project::LoadedPackage;
use crate::syntax::TypeDecl;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::sync::Arc;
use text_size::TextRange;

/// One extracted type declaration within a package.
///
/// Added at most once per (package, name); re-discovery is a no-op. The
/// spans index into the owning source file's text, so emission reproduces
/// the declaration verbatim, doc comment included.
#[derive(Debug, Clone)]
pub struct DeclRecord {
    pub name: SmolStr,
    pub package_path: String,
    /// Index into the loaded package's file list.
    pub file: usize,
    pub span: TextRange,
    pub doc: Option<TextRange>,
}

/// Everything the driver accumulates for one package: the loaded syntax,
/// extracted declarations, and the import-alias maps built from the
/// package's own source.
///
/// Created on first reference to any type in the package, owned exclusively
/// by the driver, and held until final emission.
#[derive(Debug)]
pub struct PackageRecord {
    pub pkg: Arc<LoadedPackage>,
    /// Extracted declarations, keyed and deduplicated by type name.
    pub decls: IndexMap<SmolStr, DeclRecord>,
    /// Imports the generated file will need: path -> alias actually used by
    /// the extracted declarations.
    pub imports: IndexMap<String, SmolStr>,
    /// Every alias observed for each import path across the package's
    /// source files. Used for name resolution, not emission.
    pub source_imports: IndexMap<String, Vec<SmolStr>>,
    /// Reverse lookup: alias -> import path.
    pub name_to_path: FxHashMap<SmolStr, String>,
    pub module_path: String,
}

impl PackageRecord {
    pub fn new(pkg: Arc<LoadedPackage>) -> Self {
        let module_path = pkg.module_path.clone();
        let mut record = Self {
            pkg,
            decls: IndexMap::new(),
            imports: IndexMap::new(),
            source_imports: IndexMap::new(),
            name_to_path: FxHashMap::default(),
            module_path,
        };
        let pkg = record.pkg.clone();
        for file in &pkg.files {
            imports::collect_source_imports(&mut record, &file.ast);
        }
        tracing::debug!(
            path = %record.pkg.path,
            imports = record.source_imports.len(),
            "collected source imports"
        );
        record
    }

    /// Record an extracted declaration. Duplicate names are ignored.
    pub fn record_decl(&mut self, file: usize, decl: &TypeDecl) {
        if self.decls.contains_key(&decl.name) {
            return;
        }
        self.decls.insert(
            decl.name.clone(),
            DeclRecord {
                name: decl.name.clone(),
                package_path: self.pkg.path.clone(),
                file,
                span: decl.span,
                doc: decl.doc,
            },
        );
    }

    pub fn has_decls(&self) -> bool {
        !self.decls.is_empty()
    }
}
