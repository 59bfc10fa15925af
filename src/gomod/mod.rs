//! Consumer manifest handling: reading, editing, and rewriting go.mod
//! replace directives.
//!
//! Patching follows a clean-slate policy: every pre-existing replace
//! directive is dropped, then one redirect per generated module is added.
//! Failures here never abort an extraction run; callers downgrade them to
//! warnings.

mod modfile;
mod patch;

pub use modfile::{GoMod, ManifestError, find_go_mod};
pub use patch::patch_replaces;
