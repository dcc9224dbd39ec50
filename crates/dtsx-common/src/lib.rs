//! Shared types for the dtsx declaration generator.
//!
//! Provides the foundational types used across the scanner, parser,
//! extractor and emitter crates:
//! - Source spans (`Span`, `Spanned`, `SpanBuilder`)
//! - Comment trivia (`CommentBlock`, `CommentBlockKind`)
//! - Diagnostics (`CoreWarning`, `CoreError`)

pub mod span;
pub use span::{Span, SpanBuilder, Spanned};

pub mod comments;
pub use comments::{CommentBlock, CommentBlockKind, extract_comment_blocks, leading_comment_blocks};

pub mod diagnostics;
pub use diagnostics::{CoreError, CoreWarning, DiagnosticCategory, DiagnosticMessage, messages};
