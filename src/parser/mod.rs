//! Parser for the Go declaration subset.
//!
//! A logos lexer tokenizes whole files (including code the extractor does
//! not care about), and a recursive-descent parser recovers the package
//! clause, import declarations, and type declarations. All other top-level
//! declarations are skipped by balanced-delimiter scanning. Parsing is
//! best-effort: errors are collected, never fatal.

mod lexer;
#[allow(clippy::module_inception)]
mod parser;

pub use lexer::{Token, TokenKind, lex};
pub use parser::{Parse, SyntaxError, parse};

#[cfg(test)]
mod tests;
