//! Diagnostics produced by the extraction pipeline.
//!
//! Mirrors the split used by the teacher compiler's diagnostics module:
//! recoverable anomalies become `CoreWarning`s attached to a successful
//! result, while a bug in the core itself surfaces as a typed `CoreError`
//! rather than a panic.

use crate::span::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

/// Numbered catalogue of every message the core can attach to a
/// `CoreWarning`, mirroring the teacher's `diagnostic_messages`/
/// `diagnostic_codes` split — just scaled to the handful of recoverable
/// anomalies this pipeline actually produces instead of the full compiler's.
pub mod messages {
    use super::DiagnosticCategory;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct DiagnosticMessage {
        pub code: u32,
        pub category: DiagnosticCategory,
        pub template: &'static str,
    }

    pub const UNRECOGNISED_TOP_LEVEL_CONSTRUCT: DiagnosticMessage = DiagnosticMessage {
        code: 9001,
        category: DiagnosticCategory::Warning,
        template: "unrecognised top-level construct, skipping to next boundary",
    };

    pub const FUNCTION_WITHOUT_NAME: DiagnosticMessage = DiagnosticMessage {
        code: 9002,
        category: DiagnosticCategory::Warning,
        template: "function declaration without a name outside export default",
    };

    static ALL: &[DiagnosticMessage] = &[UNRECOGNISED_TOP_LEVEL_CONSTRUCT, FUNCTION_WITHOUT_NAME];

    pub fn get_message_template(code: u32) -> Option<&'static str> {
        ALL.iter().find(|m| m.code == code).map(|m| m.template)
    }
}

pub use messages::DiagnosticMessage;

/// A recoverable anomaly recorded during extraction or emission: a parser
/// recovery point, or a declaration skipped for missing a required field.
/// The core never raises anything above `Warning` for user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreWarning {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub span: Span,
    pub message: String,
}

impl CoreWarning {
    pub fn new(file: impl Into<String>, span: Span, diagnostic: DiagnosticMessage) -> Self {
        CoreWarning {
            category: diagnostic.category,
            code: diagnostic.code,
            file: file.into(),
            span,
            message: diagnostic.template.to_string(),
        }
    }
}

/// An internal invariant violation. This is never constructed from malformed
/// user input — only from a bug in the core pipeline itself — so callers may
/// treat it as fatal for the current file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    InvariantViolation(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::InvariantViolation(msg) => write!(f, "internal invariant violation: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}
