//! Tolerant tokenizer for TypeScript source.
//!
//! The scanner never fails and never classifies TypeScript keywords as
//! distinct token kinds; it produces a flat stream of coarse tokens with
//! leading trivia attached, and leaves all syntactic judgement to the parser.
//! In particular `<` and `>` are always single-character `Punct` tokens here:
//! whether a given `<` opens a generic parameter list or is a relational
//! operator cannot be decided without parser context, so the scanner never
//! merges them into compound tokens (`>>`, `>=`, `<<`, ...) and the parser
//! resolves the ambiguity itself when it needs angle-bracket-balanced text.

pub mod lexer;
pub mod token;

pub use lexer::{Lexer, strip_bom, tokenize};
pub use token::{Token, TokenKind};
