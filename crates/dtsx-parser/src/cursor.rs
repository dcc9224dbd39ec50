//! Token cursor with the balanced-scan helpers the parser leans on.
//!
//! Two distinct scanning modes exist deliberately, matching the
//! angle-bracket ambiguity note in the scanner: a statement-boundary skip
//! that tracks only `(){}[]` (used for bodies and initializer expressions,
//! where a stray `<`/`>` is a relational operator and must not perturb
//! depth), and a type-text capture that additionally tracks `<`/`>` (used
//! only inside declaration signatures, where angle brackets are never
//! ambiguous with comparisons).

use dtsx_common::Span;
use dtsx_scanner::{Token, TokenKind};

pub struct Cursor<'a, 'b> {
    pub source: &'a str,
    tokens: &'b [Token],
    pos: usize,
}

impl<'a, 'b> Cursor<'a, 'b> {
    pub fn new(source: &'a str, tokens: &'b [Token]) -> Self {
        Cursor { source, tokens, pos: 0 }
    }

    pub fn peek(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn peek_at(&self, offset: usize) -> Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        self.tokens[idx]
    }

    pub fn is_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub fn bump(&mut self) -> Token {
        let tok = self.peek();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    pub fn text(&self, tok: Token) -> &'a str {
        tok.text(self.source)
    }

    pub fn cur_text(&self) -> &'a str {
        self.text(self.peek())
    }

    pub fn is_word(&self, word: &str) -> bool {
        self.peek().is_word(self.source, word)
    }

    pub fn is_word_at(&self, offset: usize, word: &str) -> bool {
        self.peek_at(offset).is_word(self.source, word)
    }

    pub fn is_punct(&self, ch: char) -> bool {
        self.peek().is_punct(self.source, ch)
    }

    pub fn is_punct_at(&self, offset: usize, ch: char) -> bool {
        self.peek_at(offset).is_punct(self.source, ch)
    }

    pub fn is_dot_dot_dot(&self) -> bool {
        self.peek().kind == TokenKind::DotDotDot
    }

    pub fn eat_word(&mut self, word: &str) -> bool {
        if self.is_word(word) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn eat_punct(&mut self, ch: char) -> bool {
        if self.is_punct(ch) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn start_of_cur(&self) -> u32 {
        self.peek().span.start
    }

    /// Start of the trivia (whitespace+comments) preceding the current
    /// token; used as the end boundary when closing a preceding span so
    /// that trailing trivia is not folded into it.
    pub fn end_of_prev_significant(&self) -> u32 {
        if self.pos == 0 {
            0
        } else {
            self.tokens[self.pos - 1].span.end
        }
    }

    /// Consume tokens up to and including a top-level `;`, or up to (not
    /// including) the next top-level `}`, tracking only round/curly/square
    /// bracket depth. Used for bodies and initializer/default expressions;
    /// deliberately blind to `<`/`>` nesting.
    pub fn skip_balanced_to_statement_end(&mut self) {
        let mut depth: i32 = 0;
        loop {
            let tok = self.peek();
            if tok.kind == TokenKind::Eof {
                return;
            }
            let text = self.text(tok);
            if tok.kind == TokenKind::Punct {
                match text {
                    "{" | "(" | "[" => depth += 1,
                    "}" | ")" | "]" => {
                        if depth == 0 {
                            return;
                        }
                        depth -= 1;
                    }
                    ";" if depth == 0 => {
                        self.bump();
                        return;
                    }
                    "," if depth == 0 => return,
                    _ => {}
                }
            }
            self.bump();
        }
    }

    /// Consume a `{ ... }` block (the cursor must be positioned at the
    /// opening brace), tracking only brace depth. Returns the span covering
    /// the whole block including braces.
    pub fn skip_brace_block(&mut self) -> Span {
        let start = self.start_of_cur();
        let mut depth = 0i32;
        loop {
            let tok = self.peek();
            if tok.kind == TokenKind::Eof {
                break;
            }
            if tok.kind == TokenKind::Punct {
                match self.text(tok) {
                    "{" => depth += 1,
                    "}" => {
                        depth -= 1;
                        self.bump();
                        if depth == 0 {
                            break;
                        }
                        continue;
                    }
                    _ => {}
                }
            }
            self.bump();
        }
        Span::new(start, self.end_of_prev_significant())
    }

    /// Capture a span of type-level text starting at the current position,
    /// stopping at the first token matching `stop` while bracket depth
    /// (`(){}[]<>`, tracked jointly) is zero. Does not consume the stop
    /// token. Returns `None` if the cursor starts already at a stop token.
    pub fn capture_type_text(&mut self, stop: &[&str]) -> Option<Span> {
        if self.at_stop(stop, 0) {
            return None;
        }
        let start = self.start_of_cur();
        let mut depth = 0i32;
        loop {
            let tok = self.peek();
            if tok.kind == TokenKind::Eof {
                break;
            }
            if tok.kind == TokenKind::Punct && depth == 0 && stop.contains(&self.text(tok)) {
                break;
            }
            if tok.kind == TokenKind::Punct {
                match self.text(tok) {
                    "(" | "[" | "{" | "<" => depth += 1,
                    ")" | "]" | "}" | ">" => depth -= 1,
                    _ => {}
                }
            }
            self.bump();
        }
        Some(Span::new(start, self.end_of_prev_significant()))
    }

    fn at_stop(&self, stop: &[&str], offset: usize) -> bool {
        let tok = self.peek_at(offset);
        tok.kind == TokenKind::Eof || (tok.kind == TokenKind::Punct && stop.contains(&self.text(tok)))
    }

    /// Like `capture_type_text`, but also stops at depth zero when the
    /// current token is a `Word` matching one of `stop_words` (used for
    /// clauses such as `extends T implements U` where `implements` isn't
    /// punctuation).
    pub fn capture_clause(&mut self, stop_words: &[&str], stop_puncts: &[&str]) -> Option<Span> {
        let at_word_stop = self.peek().kind == TokenKind::Word && stop_words.contains(&self.cur_text());
        if at_word_stop || self.at_stop(stop_puncts, 0) {
            return None;
        }
        let start = self.start_of_cur();
        let mut depth = 0i32;
        loop {
            let tok = self.peek();
            if tok.kind == TokenKind::Eof {
                break;
            }
            if depth == 0 {
                if tok.kind == TokenKind::Word && stop_words.contains(&self.text(tok)) {
                    break;
                }
                if tok.kind == TokenKind::Punct && stop_puncts.contains(&self.text(tok)) {
                    break;
                }
            }
            if tok.kind == TokenKind::Punct {
                match self.text(tok) {
                    "(" | "[" | "{" | "<" => depth += 1,
                    ")" | "]" | "}" | ">" => depth -= 1,
                    _ => {}
                }
            }
            self.bump();
        }
        Some(Span::new(start, self.end_of_prev_significant()))
    }

    /// Capture a `open ... close` delimited span (e.g. `[ ... ]` for a
    /// computed member key), tracking only that one bracket pair's depth.
    pub fn capture_bracketed(&mut self, open: char, close: char) -> Option<Span> {
        if !self.is_punct(open) {
            return None;
        }
        let start = self.start_of_cur();
        let mut depth = 0i32;
        loop {
            let tok = self.peek();
            if tok.kind == TokenKind::Eof {
                break;
            }
            if tok.kind == TokenKind::Punct {
                let t = self.text(tok);
                if t.len() == 1 && t.starts_with(open) {
                    depth += 1;
                } else if t.len() == 1 && t.starts_with(close) {
                    depth -= 1;
                    self.bump();
                    if depth == 0 {
                        break;
                    }
                    continue;
                }
            }
            self.bump();
        }
        Some(Span::new(start, self.end_of_prev_significant()))
    }

    /// Capture the span of a balanced `<...>` list (generics), assuming the
    /// cursor is positioned at the opening `<`. Consumes through the
    /// matching `>`. Returns `None` if not positioned at `<`.
    pub fn capture_angle_list(&mut self) -> Option<Span> {
        if !self.is_punct('<') {
            return None;
        }
        let start = self.start_of_cur();
        let mut depth = 0i32;
        loop {
            let tok = self.peek();
            if tok.kind == TokenKind::Eof {
                break;
            }
            if tok.kind == TokenKind::Punct {
                match self.text(tok) {
                    "<" => depth += 1,
                    ">" => {
                        depth -= 1;
                        self.bump();
                        if depth == 0 {
                            break;
                        }
                        continue;
                    }
                    _ => {}
                }
            }
            self.bump();
        }
        Some(Span::new(start, self.end_of_prev_significant()))
    }

    /// Skip to the next token at top-level depth that looks like a plausible
    /// recovery boundary: `;` (consumed), a `}`/EOF (not consumed), or a
    /// token starting a recognised declaration keyword (not consumed). Used
    /// when a construct fails to parse. Always advances by at least one
    /// token so recovery can never stall on the failing token itself.
    pub fn recover_to_next_boundary(&mut self) {
        let mut depth = 0i32;
        let mut first = true;
        loop {
            let tok = self.peek();
            if tok.kind == TokenKind::Eof {
                return;
            }
            if !first && depth == 0 {
                if tok.kind == TokenKind::Punct && self.text(tok) == "}" {
                    return;
                }
                if tok.kind == TokenKind::Word && RECOVERY_KEYWORDS.contains(&self.text(tok)) {
                    return;
                }
            }
            if tok.kind == TokenKind::Punct {
                match self.text(tok) {
                    "{" | "(" | "[" => depth += 1,
                    "}" | ")" | "]" => {
                        if depth == 0 {
                            return;
                        }
                        depth -= 1;
                    }
                    ";" if depth == 0 => {
                        self.bump();
                        return;
                    }
                    _ => {}
                }
            }
            self.bump();
            first = false;
        }
    }
}

const RECOVERY_KEYWORDS: &[&str] = &[
    "export", "import", "declare", "const", "let", "var", "function", "async", "interface", "type", "class",
    "abstract", "enum", "namespace", "module",
];
