//! The extraction driver: work-list scheduling over pending type references.

use super::error::ExtractError;
use super::record::PackageRecord;
use crate::base::{TypeRef, is_stdlib_path};
use crate::emit;
use crate::gomod;
use crate::project::{LoadedPackage, PackageLoader};
use crate::syntax::TypeDecl;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

/// Where to search for sources and where to write output.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub output_dir: PathBuf,
    /// Directories scanned for modules and packages.
    pub roots: Vec<PathBuf>,
    /// Starting point for the consumer go.mod search. Defaults to the
    /// current directory.
    pub manifest_dir: Option<PathBuf>,
}

/// One requested (package, type) pair seeding the extraction.
#[derive(Debug, Clone)]
pub struct TypeRequest {
    pub package: String,
    pub type_name: String,
}

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Extracted type declarations across all packages.
    pub types: usize,
    /// Packages that received a generated source file.
    pub packages: usize,
    /// Modules that received a generated manifest.
    pub modules: usize,
}

/// Drives extraction to a fixpoint.
///
/// All queue, processed-set, and package-registry state lives in one
/// `Extractor` instance with no ambient globals, so independent runs in one
/// process cannot interfere. Single-threaded by design: loads have ordering
/// side effects (module registry population) and the records are owned
/// exclusively here.
pub struct Extractor {
    options: ExtractOptions,
    pub(super) loader: PackageLoader,
    pub(super) packages: IndexMap<String, PackageRecord>,
    pending: VecDeque<TypeRef>,
    /// Companion membership set for `pending`, so enqueuing never scans the
    /// queue. Invariant: a reference is never in both `queued` and
    /// `processed`. A queue entry whose reference was since retired (a
    /// synchronous same-package collection got there first) stays in
    /// `pending` but not here, and is skipped at pop.
    queued: FxHashSet<TypeRef>,
    /// Monotonic: once a reference lands here it is never walked again,
    /// which is what terminates cyclic type graphs.
    pub(super) processed: FxHashSet<TypeRef>,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        let loader = PackageLoader::new(options.roots.clone());
        Self {
            options,
            loader,
            packages: IndexMap::new(),
            pending: VecDeque::new(),
            queued: FxHashSet::default(),
            processed: FxHashSet::default(),
        }
    }

    /// Run the full extraction: expand every request to its transitive
    /// closure, emit generated packages and module manifests, and patch the
    /// consumer manifest (best effort).
    pub fn run(&mut self, requests: &[TypeRequest]) -> Result<Summary, ExtractError> {
        for request in requests {
            self.queue_type(&request.package, &request.type_name);
        }

        while let Some(type_ref) = self.pending.pop_front() {
            self.queued.remove(&type_ref);
            if self.processed.contains(&type_ref) {
                continue;
            }
            // Standard-library types are satisfied by the toolchain; mark
            // them processed without loading anything.
            if is_stdlib_path(&type_ref.package) {
                self.processed.insert(type_ref);
                continue;
            }

            tracing::info!(type_ref = %type_ref, "processing");
            self.processed.insert(type_ref.clone());
            self.extract_type(&type_ref)?;
        }

        let report = emit::write_output(
            &self.options.output_dir,
            &self.packages,
            self.loader.modules(),
        )?;

        self.patch_consumer_manifest(&report.modules);

        Ok(Summary {
            types: report.types,
            packages: report.packages,
            modules: report.modules.len(),
        })
    }

    /// Load the owning package, locate the named declaration, record it,
    /// and walk its dependencies.
    fn extract_type(&mut self, type_ref: &TypeRef) -> Result<(), ExtractError> {
        let pkg = self.ensure_package(&type_ref.package)?;
        let Some((file, decl)) = pkg.find_type(&type_ref.name) else {
            return Err(ExtractError::TypeNotFound {
                package: type_ref.package.clone(),
                name: type_ref.name.to_string(),
            });
        };
        self.record_decl(&type_ref.package, file, decl);
        self.walk_type(&type_ref.package, &pkg, &decl.expr);
        Ok(())
    }

    /// First reference to a package creates its record; the loader caches
    /// the underlying syntax, so this is cheap afterwards.
    fn ensure_package(&mut self, path: &str) -> Result<Arc<LoadedPackage>, ExtractError> {
        if let Some(record) = self.packages.get(path) {
            return Ok(record.pkg.clone());
        }
        let pkg = self
            .loader
            .load(path)
            .map_err(|source| ExtractError::Load {
                path: path.to_string(),
                source,
            })?;
        self.packages
            .insert(path.to_string(), PackageRecord::new(pkg.clone()));
        Ok(pkg)
    }

    pub(super) fn record_decl(&mut self, pkg_path: &str, file: usize, decl: &TypeDecl) {
        if let Some(record) = self.packages.get_mut(pkg_path) {
            record.record_decl(file, decl);
        }
    }

    /// Mark a reference processed, retiring any entry still waiting in the
    /// queue so the queued/processed sets stay disjoint. Returns false if
    /// it was already processed.
    pub(super) fn mark_processed(&mut self, type_ref: TypeRef) -> bool {
        if self.processed.contains(&type_ref) {
            return false;
        }
        self.queued.remove(&type_ref);
        self.processed.insert(type_ref);
        true
    }

    /// Enqueue a reference unless it is already pending or processed.
    pub(super) fn queue_type(&mut self, package: &str, name: &str) {
        let type_ref = TypeRef::new(package, name);
        if self.processed.contains(&type_ref) || self.queued.contains(&type_ref) {
            return;
        }
        self.queued.insert(type_ref.clone());
        self.pending.push_back(type_ref);
    }

    /// Rewrite the consumer's go.mod to point every generated module at its
    /// local copy. Non-fatal: the generated code stands on its own.
    fn patch_consumer_manifest(&self, modules: &[String]) {
        if modules.is_empty() {
            return;
        }
        let start = self
            .options
            .manifest_dir
            .clone()
            .or_else(|| std::env::current_dir().ok());
        let Some(start) = start else {
            tracing::warn!("cannot determine working directory, go.mod left untouched");
            return;
        };
        match gomod::patch_replaces(&start, &self.options.output_dir, modules) {
            Ok(count) => {
                tracing::info!(count, "updated go.mod replace directives");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "go.mod not updated, replace directives must be wired by hand"
                );
            }
        }
    }
}
