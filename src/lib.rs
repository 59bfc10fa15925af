//! # typeprune
//!
//! Extracts a named type declaration from a Go package together with every
//! type it transitively depends on, across package and module boundaries,
//! and emits a minimal standalone set of packages containing only those
//! declarations. This lets a consumer depend on a small subset of a large
//! library's data types without pulling in its full dependency graph.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! extract   → dependency walker, work-list driver, per-package records
//!   ↓
//! emit      → pruned types.go + per-module go.mod synthesis
//! gomod     → consumer go.mod replace-directive patching
//!   ↓
//! project   → package locating/loading, module registry
//!   ↓
//! syntax    → typed AST subset (imports, type declarations, type exprs)
//!   ↓
//! parser    → Logos lexer, recursive-descent Go declaration parser
//!   ↓
//! base      → Primitives (TypeRef, import-path helpers)
//! config    → YAML run configuration
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → project → extract)
// ============================================================================

/// Foundation types: TypeRef, import-path helpers
pub mod base;

/// Parser: Logos lexer, recursive-descent Go declaration parser
pub mod parser;

/// Syntax: the typed AST subset the extractor consumes
pub mod syntax;

/// Project management: package loading, module discovery
pub mod project;

/// Extraction: dependency walking and the work-list driver
pub mod extract;

/// Emission: generated sources and module manifests
pub mod emit;

/// Consumer go.mod patching
pub mod gomod;

/// YAML run configuration
pub mod config;

// Re-export the items embedders touch most.
pub use base::TypeRef;
pub use config::{ConfigError, ExtractConfig};
pub use extract::{ExtractError, ExtractOptions, Extractor, Summary, TypeRequest, run_config};
