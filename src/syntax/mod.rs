//! Syntax layer: the typed AST subset of Go that the extractor consumes.
//!
//! The AST deliberately covers only what type extraction needs: the package
//! clause, import declarations, and type declarations. Everything else in a
//! source file is skipped by the parser. Declarations keep byte spans into
//! the original source so they can be re-emitted verbatim.

mod ast;

pub use ast::{
    Field, Ident, ImportSpec, InterfaceElem, Signature, SourceFile, TypeDecl, TypeExpr,
};
