//! Comment trivia extraction.
//!
//! Comments are not part of the syntactic tree produced by the scanner/parser;
//! they are extracted separately from the source text and attached to
//! declarations as leading trivia by the extractor.

use crate::span::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentBlockKind {
    /// `/** ... */`
    JsDoc,
    /// `/* ... */`
    Block,
    /// One or more line-adjacent `// ...` comments merged into one block.
    Line,
}

/// A single leading comment block, as described in the data model's
/// `LeadingComments`: one JSDoc block, one plain block comment, or a maximal
/// run of contiguous `//` lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentBlock {
    pub span: Span,
    pub kind: CommentBlockKind,
}

impl CommentBlock {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RawComment {
    span: Span,
    is_line: bool,
}

/// Scan every `//` and `/* */` comment in the source, in source order.
fn scan_raw_comments(source: &str) -> Vec<RawComment> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut pos = 0usize;
    let mut out = Vec::new();

    while pos < len {
        let ch = bytes[pos];
        if ch == b'"' || ch == b'\'' || ch == b'`' {
            pos = skip_string_or_template(bytes, pos);
            continue;
        }
        if ch == b'/' && pos + 1 < len && bytes[pos + 1] == b'/' {
            let start = pos;
            pos += 2;
            while pos < len && bytes[pos] != b'\n' && bytes[pos] != b'\r' {
                pos += 1;
            }
            out.push(RawComment { span: Span::new(start as u32, pos as u32), is_line: true });
            continue;
        }
        if ch == b'/' && pos + 1 < len && bytes[pos + 1] == b'*' {
            let start = pos;
            pos += 2;
            while pos + 1 < len && !(bytes[pos] == b'*' && bytes[pos + 1] == b'/') {
                pos += 1;
            }
            pos = (pos + 2).min(len);
            out.push(RawComment { span: Span::new(start as u32, pos as u32), is_line: false });
            continue;
        }
        pos += 1;
    }

    out
}

/// Skip a string or template literal so its contents are never mistaken for
/// comment delimiters. Template literal `${...}` holes may themselves contain
/// comments, so they recurse through this same scan.
fn skip_string_or_template(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let len = bytes.len();
    let mut pos = start + 1;
    if quote != b'`' {
        while pos < len {
            match bytes[pos] {
                b'\\' => pos += 2,
                b if b == quote => return pos + 1,
                b'\n' => return pos,
                _ => pos += 1,
            }
        }
        return pos;
    }

    // Template literal: track `${ ... }` holes, which nest braces and may
    // contain further templates, strings, or comments.
    while pos < len {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'`' => return pos + 1,
            b'$' if pos + 1 < len && bytes[pos + 1] == b'{' => {
                pos += 2;
                let mut depth = 1usize;
                while pos < len && depth > 0 {
                    match bytes[pos] {
                        b'{' => {
                            depth += 1;
                            pos += 1;
                        }
                        b'}' => {
                            depth -= 1;
                            pos += 1;
                        }
                        b'"' | b'\'' | b'`' => pos = skip_string_or_template(bytes, pos),
                        _ => pos += 1,
                    }
                }
            }
            _ => pos += 1,
        }
    }
    pos
}

fn is_jsdoc(span: Span, source: &str) -> bool {
    let text = span.slice(source);
    text.starts_with("/**") && !text.starts_with("/***")
}

/// Merge contiguous `//` runs into single blocks. Two line comments merge
/// when nothing but whitespace containing exactly one newline separates
/// them (no blank line in between).
fn merge_into_blocks(source: &str, raw: &[RawComment]) -> Vec<CommentBlock> {
    let mut blocks: Vec<CommentBlock> = Vec::new();
    let mut i = 0;
    while i < raw.len() {
        let first = raw[i];
        if !first.is_line {
            let kind = if is_jsdoc(first.span, source) { CommentBlockKind::JsDoc } else { CommentBlockKind::Block };
            blocks.push(CommentBlock { span: first.span, kind });
            i += 1;
            continue;
        }

        let mut end = first.span.end;
        let mut j = i + 1;
        while j < raw.len() && raw[j].is_line {
            let gap = source.get(end as usize..raw[j].span.start as usize).unwrap_or("");
            if is_line_adjacent_gap(gap) {
                end = raw[j].span.end;
                j += 1;
            } else {
                break;
            }
        }
        blocks.push(CommentBlock { span: Span::new(first.span.start, end), kind: CommentBlockKind::Line });
        i = j;
    }
    blocks
}

fn is_line_adjacent_gap(gap: &str) -> bool {
    gap.chars().all(|c| c.is_whitespace()) && gap.matches('\n').count() <= 1
}

/// Extract every leading comment block in the source, ready to attach to
/// declarations by position.
pub fn extract_comment_blocks(source: &str) -> Vec<CommentBlock> {
    let raw = scan_raw_comments(source);
    merge_into_blocks(source, &raw)
}

/// Find the comment blocks that are the leading trivia of a declaration
/// starting at byte offset `pos`.
///
/// A block is a declaration's leading block iff only whitespace (including
/// zero or more blank lines) separates the block's end from the
/// declaration's first token, and the same holds transitively for any
/// preceding block. Runs of `//` were already merged by
/// [`extract_comment_blocks`].
pub fn leading_comment_blocks(source: &str, pos: u32, blocks: &[CommentBlock]) -> Vec<CommentBlock> {
    let idx = blocks.partition_point(|b| b.span.end <= pos);
    if idx == 0 {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut boundary = pos;
    for block in blocks[..idx].iter().rev() {
        let gap = source.get(block.span.end as usize..boundary as usize).unwrap_or("");
        if !gap.chars().all(|c| c.is_whitespace()) {
            break;
        }
        result.push(block.clone());
        boundary = block.span.start;
    }
    result.reverse();
    result
}

#[cfg(test)]
#[path = "tests/comments.rs"]
mod tests;
