//! Extracts and emits the public API surface of a TypeScript source file as
//! a `.d.ts` declaration file.
//!
//! The pipeline is scan → parse → extract → close over references → emit,
//! split across `dtsx-scanner`, `dtsx-parser`, `dtsx-extractor` and
//! `dtsx-emitter`. This crate is the thin facade a collaborating driver
//! actually calls: [`extract`] builds the [`Declaration`] surface for one
//! source file, [`emit`] turns a surface back into `.d.ts` text, and
//! [`generate`] does both in one call while checking the one invariant that
//! would otherwise surface as silently wrong output (a declaration span
//! pointing outside the source it was extracted from).

pub use dtsx_common::{CoreError, CoreWarning, DiagnosticCategory, Span};
pub use dtsx_extractor::{Declaration, ExtractOptions, ExtractResult, ReferenceAllowLists, extract};
pub use dtsx_emitter::{EmitOptions, emit};

/// Runs the full pipeline: extract the declaration surface, then emit it.
///
/// Returns the rendered `.d.ts` text and any recoverable warnings collected
/// during extraction. Fails only on an internal invariant violation (a
/// corrupt span) — never on malformed source, which instead shows up as
/// `warnings` on success.
#[tracing::instrument(level = "debug", skip(source, extract_options, emit_options, allow_lists), fields(file = file_name))]
pub fn generate(
    source: &str,
    file_name: &str,
    extract_options: ExtractOptions,
    emit_options: EmitOptions,
    allow_lists: &ReferenceAllowLists,
) -> Result<(String, Vec<CoreWarning>), CoreError> {
    let result = extract(source, file_name, extract_options, allow_lists);
    check_spans_in_bounds(&result.declarations, source)?;
    let text = emit(&result.declarations, emit_options);
    tracing::debug!(bytes = text.len(), warnings = result.warnings.len(), "generated declaration file");
    Ok((text, result.warnings))
}

fn check_spans_in_bounds(declarations: &[Declaration<'_>], source: &str) -> Result<(), CoreError> {
    for decl in declarations {
        if decl.span.end as usize > source.len() {
            return Err(CoreError::InvariantViolation(format!(
                "declaration '{}' span {} exceeds source length {}",
                decl.name,
                decl.span,
                source.len()
            )));
        }
        if let dtsx_extractor::DeclKind::Module(m) = &decl.kind {
            check_spans_in_bounds(&m.body, source)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/generate.rs"]
mod tests;
