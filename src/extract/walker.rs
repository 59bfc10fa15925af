//! Dependency walker: discovers every named type a type expression
//! references.
//!
//! Traversal is an exhaustive match over the closed set of type-expression
//! shapes. Bare identifiers that name a locally declared type are the
//! same-package base case and are collected on the spot; qualified
//! identifiers are the cross-package base case and are queued for the
//! driver. Builtins and unrecognized forms are terminal.

use super::driver::Extractor;
use crate::base::{TypeRef, is_stdlib_path};
use crate::project::LoadedPackage;
use crate::syntax::{Ident, InterfaceElem, Signature, TypeExpr};

impl Extractor {
    pub(super) fn walk_type(&mut self, pkg_path: &str, pkg: &LoadedPackage, expr: &TypeExpr) {
        match expr {
            TypeExpr::Ident(ident) => {
                if pkg.declares_type(&ident.name) {
                    self.collect_local(pkg_path, pkg, &ident.name);
                }
            }

            TypeExpr::Selector { qualifier, name } => {
                self.resolve_selector(pkg_path, qualifier, name);
            }

            TypeExpr::Pointer(inner) | TypeExpr::Variadic(inner) => {
                self.walk_type(pkg_path, pkg, inner);
            }

            TypeExpr::Array { elem } | TypeExpr::Chan { elem } => {
                self.walk_type(pkg_path, pkg, elem);
            }

            TypeExpr::Map { key, value } => {
                self.walk_type(pkg_path, pkg, key);
                self.walk_type(pkg_path, pkg, value);
            }

            TypeExpr::Struct { fields } => {
                // Embedded fields carry dependencies exactly like named ones.
                for field in fields {
                    self.walk_type(pkg_path, pkg, &field.ty);
                }
            }

            TypeExpr::Interface { elems } => {
                for elem in elems {
                    match elem {
                        InterfaceElem::Embedded(ty) => self.walk_type(pkg_path, pkg, ty),
                        InterfaceElem::Method { sig, .. } => {
                            self.walk_signature(pkg_path, pkg, sig)
                        }
                    }
                }
            }

            TypeExpr::Func(sig) => self.walk_signature(pkg_path, pkg, sig),

            TypeExpr::Opaque => {}
        }
    }

    fn walk_signature(&mut self, pkg_path: &str, pkg: &LoadedPackage, sig: &Signature) {
        for ty in &sig.params {
            self.walk_type(pkg_path, pkg, ty);
        }
        for ty in &sig.results {
            self.walk_type(pkg_path, pkg, ty);
        }
    }

    /// Same-package reference: collected synchronously the first time the
    /// name is encountered. The declaration is recorded before its body is
    /// walked, which is what terminates same-package cycles.
    fn collect_local(&mut self, pkg_path: &str, pkg: &LoadedPackage, name: &str) {
        if !self.mark_processed(TypeRef::new(pkg_path, name)) {
            return;
        }

        if let Some((file, decl)) = pkg.find_type(name) {
            self.record_decl(pkg_path, file, decl);
            self.walk_type(pkg_path, pkg, &decl.expr);
        }
    }

    /// Cross-package reference `alias.Name`: resolve the alias to an import
    /// path, queue the referenced type, and note that the owning package now
    /// needs that import in its generated file.
    fn resolve_selector(&mut self, pkg_path: &str, qualifier: &Ident, name: &Ident) {
        let alias = &qualifier.name;
        let Some(record) = self.packages.get(pkg_path) else {
            return;
        };

        // Reverse alias map first.
        let mut target = record.name_to_path.get(alias).cloned();

        // Then package-clause names of the package's imports, loading them
        // on demand: an unaliased import whose directory name differs from
        // its package name resolves here. Loads are cached, so repeat
        // resolutions through the same import are cheap.
        if target.is_none() {
            'outer: for file in &record.pkg.files {
                for imp in &file.ast.imports {
                    if is_stdlib_path(&imp.path) {
                        continue;
                    }
                    match self.loader.load(&imp.path) {
                        Ok(pkg) if pkg.name == *alias => {
                            target = Some(imp.path.clone());
                            break 'outer;
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::debug!(
                                path = %imp.path,
                                error = %e,
                                "cannot load import while resolving qualifier"
                            );
                        }
                    }
                }
            }
        }

        // Finally, aliases already recorded for emission.
        if target.is_none() {
            target = record
                .imports
                .iter()
                .find(|(_, a)| *a == alias)
                .map(|(p, _)| p.clone());
        }

        let Some(path) = target else {
            tracing::debug!(
                package = pkg_path,
                alias = %alias,
                name = %name.name,
                "unresolvable qualified identifier"
            );
            return;
        };

        self.queue_type(&path, &name.name);
        if let Some(record) = self.packages.get_mut(pkg_path) {
            record.imports.insert(path, alias.clone());
        }
    }
}
