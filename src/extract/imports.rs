//! Import-alias collection and the mangled-alias heuristic.

use super::record::PackageRecord;
use crate::base::final_segment;
use crate::syntax::SourceFile;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// Detect mechanically generated disambiguation aliases, which encode the
/// import path's own segments and must never win name resolution or appear
/// in emitted output.
///
/// An alias counts as mangled when the path has at least three segments and
/// either the alias contains all of them joined by underscores (dots and
/// dashes normalized to underscores), or the alias itself contains two or
/// more underscores. Genuine human aliases like `metav1` or `synccommon`
/// match neither pattern. Best effort, not a guarantee.
pub fn is_mangled_alias(alias: &str, path: &str) -> bool {
    let parts: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() < 3 {
        return false;
    }
    let mangled = parts.join("_").replace(['.', '-'], "_");
    alias.contains(&mangled) || alias.matches('_').count() >= 2
}

/// Fold one source file's imports into the package record's alias maps.
pub fn collect_source_imports(record: &mut PackageRecord, file: &SourceFile) {
    collect_file_imports(&mut record.source_imports, &mut record.name_to_path, file);
}

/// The map-building core, separated from [`PackageRecord`] so it can be
/// exercised on parsed source alone.
///
/// Imports without an explicit alias are keyed under the path's final
/// segment. Blank (`_`) and dot imports can never qualify a selector and
/// are skipped. On a reverse-map collision, an explicit alias overrides
/// whatever was stored before; an inferred alias never overrides.
pub(super) fn collect_file_imports(
    source_imports: &mut IndexMap<String, Vec<SmolStr>>,
    name_to_path: &mut FxHashMap<SmolStr, String>,
    file: &SourceFile,
) {
    for imp in &file.imports {
        let path = &imp.path;
        let (alias, explicit) = match &imp.alias {
            Some(a) if a == "_" || a == "." => continue,
            Some(a) => (a.clone(), true),
            None => (SmolStr::new(final_segment(path)), false),
        };

        if explicit && is_mangled_alias(&alias, path) {
            tracing::debug!(path = %path, alias = %alias, "skipping mangled import alias");
            continue;
        }

        let aliases = source_imports.entry(path.clone()).or_default();
        if aliases.contains(&alias) {
            continue;
        }
        aliases.push(alias.clone());

        if let Some(existing) = name_to_path.get(&alias) {
            if explicit {
                tracing::debug!(
                    alias = %alias,
                    old = %existing,
                    new = %path,
                    "alias collision, preferring explicit alias"
                );
                name_to_path.insert(alias, path.clone());
            }
        } else {
            name_to_path.insert(alias, path.clone());
        }
    }
}
