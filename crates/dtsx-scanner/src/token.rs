//! Token kinds produced by the scanner.
//!
//! The token set is deliberately coarse: the core never evaluates
//! expressions, so operators inside skipped bodies/initializers only need to
//! be told apart from the structural delimiters (`{}()[]<>`), strings, and
//! templates. Keywords are not their own token kind — the parser recognises
//! them by comparing a `Word` token's text, since which words are
//! "keywords" is itself context-dependent in TypeScript (`type`, `as`, `from`
//! are only keywords in specific positions).

use dtsx_common::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier or keyword.
    Word,
    Number,
    StringLit,
    /// A whole template literal, including any `${ ... }` holes, as one
    /// opaque span — the core never needs to inspect inside a template.
    TemplateLit,
    /// `=>`
    Arrow,
    /// `...`
    DotDotDot,
    /// `?.`
    QuestionDot,
    /// A single structural or operator character: one of
    /// `{ } ( ) [ ] < > , ; : ? ! . = | & + - * / % ^ ~ @ #`
    Punct,
    Eof,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Trivia (whitespace + comments) from the end of the previous
    /// non-trivia token up to the start of this one.
    pub leading_trivia: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }

    pub fn is_word(&self, source: &str, text: &str) -> bool {
        self.kind == TokenKind::Word && self.text(source) == text
    }

    pub fn is_punct(&self, source: &str, ch: char) -> bool {
        self.kind == TokenKind::Punct && self.text(source).starts_with(ch) && self.span.len() == 1
    }
}
