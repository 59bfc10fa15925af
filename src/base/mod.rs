//! Foundation types for the typeprune toolchain.
//!
//! This module provides fundamental types used throughout the extractor:
//! - [`TypeRef`] - A (package path, type name) pair identifying one type
//! - Package-path helpers (final segment, standard-library classification)
//!
//! This module has NO dependencies on other typeprune modules.

mod paths;
mod type_ref;

pub use paths::{final_segment, is_stdlib_path};
pub use type_ref::TypeRef;
