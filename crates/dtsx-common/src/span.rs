//! Span - byte-offset source locations shared by every stage of the pipeline.
//!
//! A Span is a half-open byte range `[start, end)` into a source buffer. The
//! scanner, parser, extractor and emitter all address the same buffer by byte
//! offset; line/column is only ever derived for diagnostics, never used to
//! drive parsing decisions.
//!
//! Spans are small (8 bytes) and cheap to copy.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: u32,
    /// End byte offset (exclusive)
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create an empty span at the given position.
    #[inline]
    pub const fn at(pos: u32) -> Self {
        Span { start: pos, end: pos }
    }

    /// A dummy span for synthesised nodes that have no source location.
    #[inline]
    pub const fn dummy() -> Self {
        Span { start: u32::MAX, end: u32::MAX }
    }

    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.start == u32::MAX && self.end == u32::MAX
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Merge two spans into the smallest span covering both.
    #[inline]
    pub const fn merge(&self, other: Span) -> Span {
        let start = if self.start < other.start { self.start } else { other.start };
        let end = if self.end > other.end { self.end } else { other.end };
        Span { start, end }
    }

    /// Extract the slice of text this span covers. Panics-free: returns `""`
    /// on an out-of-range span rather than panicking, since spans can outlive
    /// edits to the buffer they were computed against during incremental use.
    #[inline]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let start = self.start as usize;
        let end = self.end as usize;
        text.get(start..end).unwrap_or("")
    }

    /// Like [`Span::slice`] but clamps out-of-range offsets instead of
    /// returning an empty string, used when a span was computed against a
    /// slightly different buffer (e.g. after BOM stripping).
    #[inline]
    pub fn slice_safe<'a>(&self, text: &'a str) -> &'a str {
        let start = (self.start as usize).min(text.len());
        let end = (self.end as usize).min(text.len());
        if start <= end { text.get(start..end).unwrap_or("") } else { "" }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A trait for types that carry a source span.
pub trait Spanned {
    fn span(&self) -> Span;

    fn start(&self) -> u32 {
        self.span().start
    }

    fn end(&self) -> u32 {
        self.span().end
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

/// Helper for building a span while scanning forward through source text.
#[derive(Clone, Copy, Debug)]
pub struct SpanBuilder {
    start: u32,
}

impl SpanBuilder {
    #[inline]
    pub const fn start(pos: u32) -> Self {
        SpanBuilder { start: pos }
    }

    #[inline]
    pub const fn end(&self, pos: u32) -> Span {
        Span::new(self.start, pos)
    }

    #[inline]
    pub const fn start_pos(&self) -> u32 {
        self.start
    }
}

#[cfg(test)]
#[path = "tests/span.rs"]
mod tests;
