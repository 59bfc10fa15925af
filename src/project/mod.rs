//! Project layer: locating and loading Go packages from the filesystem.
//!
//! Packages are located through a module index built by scanning the
//! configured source roots for `go.mod` manifests; a package path resolves
//! to the directory of its longest-prefix module plus the remaining path
//! segments. Loads are cached by package path and populate a registry of
//! modules encountered along the way.

mod error;
mod loader;
mod modules;

pub use error::LoadError;
pub use loader::{LoadedPackage, PackageLoader, SourceUnit};
pub use modules::{ModuleIndex, ModuleRecord};

pub(crate) use modules::parse_module_line;
