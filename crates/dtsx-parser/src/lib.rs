//! Tolerant parser producing the top-level syntactic tree the extractor
//! walks: every top-level statement, and for class/interface/enum/module
//! bodies their member lists, with signatures (params/generics/return
//! types/clauses) captured as source spans rather than re-parsed structure.
//!
//! Function bodies, initializer expressions, parameter defaults, decorators
//! and static blocks are located only well enough to be skipped — the
//! extractor never needs their contents.

pub mod ast;
pub mod cursor;
pub mod parser;

pub use ast::*;
pub use parser::{Parser, parse};

#[cfg(test)]
#[path = "tests/parser.rs"]
mod tests;
