//! Generates one pruned source file per extracted package and one minimal
//! go.mod per module that contributed declarations.

use super::error::EmitError;
use crate::base::{final_segment, is_stdlib_path};
use crate::extract::PackageRecord;
use crate::project::ModuleRecord;
use indexmap::IndexMap;
use std::ops::Range;
use std::path::Path;

/// Toolchain floor written into every generated module manifest.
const GO_VERSION: &str = "1.21";

/// Counts and module list from one emission pass.
#[derive(Debug, Default)]
pub struct EmitReport {
    pub packages: usize,
    pub types: usize,
    /// Module paths that received a generated manifest, in registry order.
    pub modules: Vec<String>,
}

/// Write all generated output under `output_dir`.
///
/// Files are written and closed one at a time; no handle outlives its loop
/// iteration.
pub fn write_output(
    output_dir: &Path,
    packages: &IndexMap<String, PackageRecord>,
    modules: &IndexMap<String, ModuleRecord>,
) -> Result<EmitReport, EmitError> {
    let mut report = EmitReport::default();

    report.modules = write_module_manifests(output_dir, packages, modules)?;

    for (pkg_path, record) in packages {
        if !record.has_decls() {
            continue;
        }
        let dir = output_dir.join(pkg_path);
        std::fs::create_dir_all(&dir).map_err(|e| EmitError::io(&dir, e))?;

        let out_path = dir.join("types.go");
        let content = render_package(pkg_path, record, packages);
        std::fs::write(&out_path, content).map_err(|e| EmitError::io(&out_path, e))?;

        tracing::info!(
            path = %out_path.display(),
            types = record.decls.len(),
            "generated"
        );
        report.packages += 1;
        report.types += record.decls.len();
    }

    Ok(report)
}

fn write_module_manifests(
    output_dir: &Path,
    packages: &IndexMap<String, PackageRecord>,
    modules: &IndexMap<String, ModuleRecord>,
) -> Result<Vec<String>, EmitError> {
    let mut emitted = Vec::new();
    for (module_path, module) in modules {
        if is_stdlib_path(module_path) {
            continue;
        }
        let has_decls = module
            .packages
            .iter()
            .any(|p| packages.get(p).is_some_and(PackageRecord::has_decls));
        if !has_decls {
            continue;
        }

        let dir = output_dir.join(module_path);
        std::fs::create_dir_all(&dir).map_err(|e| EmitError::io(&dir, e))?;
        let manifest = dir.join("go.mod");
        let content = format!("module {module_path}\n\ngo {GO_VERSION}\n");
        std::fs::write(&manifest, content).map_err(|e| EmitError::io(&manifest, e))?;

        tracing::info!(path = %manifest.display(), "generated");
        emitted.push(module_path.clone());
    }
    Ok(emitted)
}

/// Render one generated source file: provenance header, package clause,
/// pruned import block, then every extracted declaration verbatim.
fn render_package(
    pkg_path: &str,
    record: &PackageRecord,
    packages: &IndexMap<String, PackageRecord>,
) -> String {
    let mut out = String::new();
    out.push_str("// Code generated by typeprune. DO NOT EDIT.\n");
    out.push_str(&format!("// Source: {pkg_path}\n\n"));
    out.push_str(&format!("package {}\n\n", record.pkg.name));

    // Imports to packages that contributed no declarations would be
    // unresolvable in the output; they are pruned, not emitted.
    let mut imports: Vec<(&String, &smol_str::SmolStr)> = record
        .imports
        .iter()
        .filter(|(path, _)| {
            is_stdlib_path(path)
                || packages.get(*path).is_some_and(PackageRecord::has_decls)
        })
        .collect();
    imports.sort_by(|a, b| a.0.cmp(b.0));

    match imports.len() {
        0 => {}
        1 => {
            let (path, alias) = imports[0];
            out.push_str(&format!("import {}\n\n", render_import(path, alias)));
        }
        _ => {
            out.push_str("import (\n");
            for (path, alias) in &imports {
                out.push_str(&format!("\t{}\n", render_import(path, alias)));
            }
            out.push_str(")\n\n");
        }
    }

    for decl in record.decls.values() {
        let text = record.pkg.files[decl.file].text.as_str();
        if let Some(doc) = decl.doc {
            out.push_str(&text[Range::<usize>::from(doc)]);
            out.push('\n');
        }
        out.push_str("type ");
        out.push_str(&text[Range::<usize>::from(decl.span)]);
        out.push_str("\n\n");
    }

    out
}

fn render_import(path: &str, alias: &str) -> String {
    if alias == final_segment(path) {
        format!("\"{path}\"")
    } else {
        format!("{alias} \"{path}\"")
    }
}
