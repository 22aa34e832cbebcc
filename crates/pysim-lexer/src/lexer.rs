//! The PySim lexer.
//!
//! Turns source text into a stream of [`Token`]s. The lexer is total:
//! it never fails. Characters it does not understand become
//! [`TokenKind::Unknown`] tokens and unterminated strings yield the
//! text collected so far, leaving recovery decisions to the parser.
//!
//! Layout is tokenized explicitly. Each logical line ends with a
//! [`TokenKind::Newline`], and changes in leading whitespace produce
//! [`TokenKind::Indent`] and [`TokenKind::Dedent`] tokens. Blank and
//! comment-only lines are skipped entirely and never affect
//! indentation. Inside brackets, newlines are treated as plain
//! whitespace.
//!
//! f-strings are lexed with a mode stack. `f"a {x} b"` produces
//! `FStringStart("a ")`, `InterpolationStart`, the tokens of `x`,
//! `InterpolationEnd`, `FStringEnd(" b")`. An f-string without any
//! interpolation collapses to a plain [`TokenKind::StringLit`].

use crate::token::{Token, TokenKind};
use pysim_types::Span;
use std::collections::VecDeque;

/// Lexer state for one mode on the mode stack.
#[derive(Debug, Clone, PartialEq)]
enum Mode {
    /// Inside an f-string body, between interpolations.
    /// `first` is true until the first `{` has been seen.
    FString { quote: char, first: bool },
    /// Inside a `{...}` interpolation. `brace_depth` counts nested
    /// `{` so dict literals inside interpolations close correctly.
    Interpolation { brace_depth: u32 },
}

/// Tokenizer for the supported Python subset.
pub struct Lexer<'src> {
    source: &'src str,
    /// Byte offset into `source`.
    pos: usize,
    /// Current line, 1-based.
    line: u32,
    /// Current column, 1-based.
    col: u32,
    /// Mode stack. Empty means normal code.
    modes: Vec<Mode>,
    /// Tokens scanned ahead of time (dedent runs, interpolation markers).
    pending: VecDeque<Token>,
    /// Open indentation widths. Always starts with 0.
    indent_stack: Vec<u32>,
    /// Open `(`, `[` and `{` count. Newlines are suppressed inside.
    bracket_depth: u32,
    /// True when the next token starts a logical line.
    at_line_start: bool,
    /// Set once the end-of-input token sequence has been queued.
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            col: 1,
            modes: Vec::new(),
            pending: VecDeque::new(),
            indent_stack: vec![0],
            bracket_depth: 0,
            at_line_start: true,
            finished: false,
        }
    }

    /// Lex the entire input, including the trailing [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.pending.pop_front() {
            return token;
        }
        match self.modes.last() {
            Some(Mode::FString { .. }) => self.scan_fstring_text(),
            Some(Mode::Interpolation { .. }) => self.scan_code_token(),
            None => {
                if self.at_line_start && self.bracket_depth == 0 {
                    if let Some(token) = self.handle_line_start() {
                        return token;
                    }
                }
                self.scan_code_token()
            }
        }
    }

    // ── Cursor ───────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    /// Consume `\n` or `\r\n` as one newline.
    fn bump_newline(&mut self) {
        if self.peek() == Some('\r') {
            self.bump();
        }
        if self.peek() == Some('\n') {
            self.bump();
        }
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span from a recorded start position to the character just consumed.
    fn span_from(&self, start_line: u32, start_col: u32) -> Span {
        Span::new(start_line, start_col, self.line, self.col.saturating_sub(1))
    }

    fn token(&self, kind: TokenKind, start_line: u32, start_col: u32) -> Token {
        Token::new(kind, self.span_from(start_line, start_col))
    }

    // ── Line starts and indentation ──────────────────────────

    /// At the start of a logical line: skip blank and comment-only
    /// lines, measure indentation, and queue Indent/Dedent tokens.
    /// Returns a token if any were queued.
    fn handle_line_start(&mut self) -> Option<Token> {
        let width = loop {
            let mut width: u32 = 0;
            while matches!(self.peek(), Some(' ') | Some('\t')) {
                self.bump();
                width += 1;
            }
            match self.peek() {
                None => {
                    self.at_line_start = false;
                    return Some(self.queue_end_of_input());
                }
                Some('#') => {
                    self.skip_comment();
                    self.bump_newline();
                }
                Some('\n') | Some('\r') => {
                    self.bump_newline();
                }
                Some(_) => break width,
            }
        };
        self.at_line_start = false;

        let current = *self.indent_stack.last().unwrap_or(&0);
        if width > current {
            self.indent_stack.push(width);
            self.pending.push_back(Token::new(
                TokenKind::Indent,
                Span::new(self.line, 1, self.line, width.max(1)),
            ));
        } else if width < current {
            // Pop to the nearest enclosing level. A width that matches
            // no open level closes down to the first level at or below
            // it rather than reporting an error.
            while self.indent_stack.last().is_some_and(|&w| w > width) {
                self.indent_stack.pop();
                self.pending.push_back(Token::new(
                    TokenKind::Dedent,
                    Span::new(self.line, 1, self.line, width.max(1)),
                ));
            }
        }
        self.pending.pop_front()
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.bump();
        }
    }

    /// Queue any outstanding Dedents and the final Eof.
    fn queue_end_of_input(&mut self) -> Token {
        if self.finished {
            return Token::new(TokenKind::Eof, Span::point(self.line, self.col));
        }
        self.finished = true;
        let here = Span::point(self.line, self.col);
        while self.indent_stack.last().is_some_and(|&w| w > 0) {
            self.indent_stack.pop();
            self.pending.push_back(Token::new(TokenKind::Dedent, here));
        }
        self.pending.push_back(Token::new(TokenKind::Eof, here));
        match self.pending.pop_front() {
            Some(token) => token,
            None => Token::new(TokenKind::Eof, here),
        }
    }

    // ── Code tokens ──────────────────────────────────────────

    fn scan_code_token(&mut self) -> Token {
        // Inline whitespace never separates logical lines.
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.bump();
        }
        if self.peek() == Some('#') {
            self.skip_comment();
        }

        let start_line = self.line;
        let start_col = self.col;

        let c = match self.peek() {
            Some(c) => c,
            None => {
                if self.modes.is_empty() && !self.at_line_start {
                    // Input ended mid-line: close the logical line first.
                    self.at_line_start = true;
                    return Token::new(TokenKind::Newline, Span::point(self.line, self.col));
                }
                self.modes.clear();
                return self.queue_end_of_input();
            }
        };

        match c {
            '\n' | '\r' => {
                self.bump_newline();
                if self.bracket_depth > 0 {
                    // Inside brackets a newline is just whitespace.
                    return self.scan_code_token();
                }
                if !self.modes.is_empty() {
                    // Unterminated f-string interpolation. Abandon the
                    // string and resume normal lexing on the next line.
                    self.modes.clear();
                }
                self.at_line_start = true;
                Token::new(
                    TokenKind::Newline,
                    Span::point(start_line, start_col),
                )
            }
            '0'..='9' => self.scan_number(),
            '"' | '\'' => self.scan_string(c),
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_word(),
            _ => self.scan_operator(c),
        }
    }

    fn scan_number(&mut self) -> Token {
        let start_line = self.line;
        let start_col = self.col;
        let start = self.pos;
        while matches!(self.peek(), Some('0'..='9')) {
            self.bump();
        }
        let mut is_float = false;
        if self.peek() == Some('.') && matches!(self.peek_second(), Some('0'..='9')) {
            is_float = true;
            self.bump();
            while matches!(self.peek(), Some('0'..='9')) {
                self.bump();
            }
        }
        let text = &self.source[start..self.pos];
        let kind = if is_float {
            TokenKind::FloatLit(text.parse().unwrap_or(f64::INFINITY))
        } else {
            match text.parse::<i64>() {
                Ok(n) => TokenKind::IntLit(n),
                // Out of i64 range, keep the value as a float.
                Err(_) => TokenKind::FloatLit(text.parse().unwrap_or(f64::INFINITY)),
            }
        };
        self.token(kind, start_line, start_col)
    }

    fn scan_word(&mut self) -> Token {
        let start_line = self.line;
        let start_col = self.col;
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.bump();
        }
        let text = &self.source[start..self.pos];

        // An `f` prefix directly before a quote starts an f-string.
        if (text == "f" || text == "F") && matches!(self.peek(), Some('"') | Some('\'')) {
            let quote = match self.bump() {
                Some(q) => q,
                None => '"',
            };
            self.modes.push(Mode::FString { quote, first: true });
            return self.scan_fstring_text();
        }

        let kind = match TokenKind::from_keyword(text) {
            Some(kind) => kind,
            None => TokenKind::Identifier(text.to_string()),
        };
        self.token(kind, start_line, start_col)
    }

    fn scan_string(&mut self, quote: char) -> Token {
        let start_line = self.line;
        let start_col = self.col;
        self.bump();
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => break,
                Some(c) if c == quote => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    self.scan_escape(&mut value);
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
        self.token(TokenKind::StringLit(value), start_line, start_col)
    }

    /// Decode one escape sequence after a consumed backslash.
    /// Unrecognised escapes pass through with the backslash intact.
    fn scan_escape(&mut self, out: &mut String) {
        let c = match self.bump() {
            Some(c) => c,
            None => {
                out.push('\\');
                return;
            }
        };
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'x' => self.scan_hex_escape(out, 2, 'x'),
            'u' => self.scan_hex_escape(out, 4, 'u'),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    /// `\xHH` and `\uHHHH`. If the digits are missing or the code point
    /// is invalid, the sequence passes through as written.
    fn scan_hex_escape(&mut self, out: &mut String, digits: usize, marker: char) {
        let start = self.pos;
        for _ in 0..digits {
            if self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            } else {
                break;
            }
        }
        let text = &self.source[start..self.pos];
        let decoded = if text.len() == digits {
            u32::from_str_radix(text, 16).ok().and_then(char::from_u32)
        } else {
            None
        };
        match decoded {
            Some(c) => out.push(c),
            None => {
                out.push('\\');
                out.push(marker);
                out.push_str(text);
            }
        }
    }

    // ── f-strings ────────────────────────────────────────────

    /// Scan literal text inside an f-string up to the next `{`, the
    /// closing quote, or end of line.
    fn scan_fstring_text(&mut self) -> Token {
        let (quote, first) = match self.modes.last() {
            Some(Mode::FString { quote, first }) => (*quote, *first),
            _ => return self.scan_code_token(),
        };
        let start_line = self.line;
        let start_col = self.col;
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    // Unterminated. Keep the collected text.
                    self.modes.pop();
                    let kind = if first {
                        TokenKind::StringLit(value)
                    } else {
                        TokenKind::FStringEnd(value)
                    };
                    return self.token_or_point(kind, start_line, start_col);
                }
                Some(c) if c == quote => {
                    self.bump();
                    self.modes.pop();
                    let kind = if first {
                        // No interpolation at all: a plain string.
                        TokenKind::StringLit(value)
                    } else {
                        TokenKind::FStringEnd(value)
                    };
                    return self.token(kind, start_line, start_col);
                }
                Some('{') if self.peek_second() == Some('{') => {
                    self.bump();
                    self.bump();
                    value.push('{');
                }
                Some('}') if self.peek_second() == Some('}') => {
                    self.bump();
                    self.bump();
                    value.push('}');
                }
                Some('{') => {
                    self.bump();
                    if let Some(Mode::FString { first, .. }) = self.modes.last_mut() {
                        *first = false;
                    }
                    self.modes.push(Mode::Interpolation { brace_depth: 0 });
                    let kind = if first {
                        TokenKind::FStringStart(value)
                    } else {
                        TokenKind::FStringPart(value)
                    };
                    self.pending.push_back(Token::new(
                        TokenKind::InterpolationStart,
                        Span::point(self.line, self.col.saturating_sub(1)),
                    ));
                    return self.token_or_point(kind, start_line, start_col);
                }
                Some('\\') => {
                    self.bump();
                    self.scan_escape(&mut value);
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
    }

    /// Like [`token`](Self::token) but valid even when nothing was
    /// consumed (empty f-string segments).
    fn token_or_point(&self, kind: TokenKind, start_line: u32, start_col: u32) -> Token {
        if self.line == start_line && self.col == start_col {
            Token::new(kind, Span::point(start_line, start_col))
        } else {
            Token::new(kind, self.span_from(start_line, start_col))
        }
    }

    // ── Operators and punctuation ────────────────────────────

    fn scan_operator(&mut self, c: char) -> Token {
        let start_line = self.line;
        let start_col = self.col;
        self.bump();
        let eq_next = self.peek() == Some('=');

        let kind = match c {
            '+' => self.with_eq(eq_next, TokenKind::PlusEq, TokenKind::Plus),
            '-' => self.with_eq(eq_next, TokenKind::MinusEq, TokenKind::Minus),
            '%' => self.with_eq(eq_next, TokenKind::PercentEq, TokenKind::Percent),
            '*' => {
                if self.peek() == Some('*') {
                    self.bump();
                    let eq = self.peek() == Some('=');
                    self.with_eq(eq, TokenKind::StarStarEq, TokenKind::StarStar)
                } else {
                    self.with_eq(eq_next, TokenKind::StarEq, TokenKind::Star)
                }
            }
            '/' => {
                if self.peek() == Some('/') {
                    self.bump();
                    let eq = self.peek() == Some('=');
                    self.with_eq(eq, TokenKind::SlashSlashEq, TokenKind::SlashSlash)
                } else {
                    self.with_eq(eq_next, TokenKind::SlashEq, TokenKind::Slash)
                }
            }
            '=' => self.with_eq(eq_next, TokenKind::EqEq, TokenKind::Eq),
            '<' => self.with_eq(eq_next, TokenKind::LessEq, TokenKind::Less),
            '>' => self.with_eq(eq_next, TokenKind::GreaterEq, TokenKind::Greater),
            '!' => {
                if eq_next {
                    self.bump();
                    TokenKind::BangEq
                } else {
                    TokenKind::Unknown('!')
                }
            }
            '(' => {
                self.bracket_depth += 1;
                TokenKind::LParen
            }
            ')' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                TokenKind::RParen
            }
            '[' => {
                self.bracket_depth += 1;
                TokenKind::LBracket
            }
            ']' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                TokenKind::RBracket
            }
            '{' => {
                if let Some(Mode::Interpolation { brace_depth }) = self.modes.last_mut() {
                    *brace_depth += 1;
                } else {
                    self.bracket_depth += 1;
                }
                TokenKind::LBrace
            }
            '}' => match self.modes.last_mut() {
                Some(Mode::Interpolation { brace_depth }) if *brace_depth == 0 => {
                    self.modes.pop();
                    TokenKind::InterpolationEnd
                }
                Some(Mode::Interpolation { brace_depth }) => {
                    *brace_depth -= 1;
                    TokenKind::RBrace
                }
                _ => {
                    self.bracket_depth = self.bracket_depth.saturating_sub(1);
                    TokenKind::RBrace
                }
            },
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            other => TokenKind::Unknown(other),
        };
        self.token(kind, start_line, start_col)
    }

    fn with_eq(&mut self, eq_next: bool, with: TokenKind, without: TokenKind) -> TokenKind {
        if eq_next {
            self.bump();
            with
        } else {
            without
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Identifier(s.to_string())
    }

    #[test]
    fn test_simple_assignment() {
        assert_eq!(
            kinds("x = 5"),
            vec![
                ident("x"),
                TokenKind::Eq,
                TokenKind::IntLit(5),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_float_and_int() {
        assert_eq!(
            kinds("3.14 42"),
            vec![
                TokenKind::FloatLit(3.14),
                TokenKind::IntLit(42),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_dot_without_digits_is_not_float() {
        // `x.append` must lex the dot separately
        assert_eq!(
            kinds("a.b"),
            vec![
                ident("a"),
                TokenKind::Dot,
                ident("b"),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_vs_identifiers() {
        assert_eq!(
            kinds("if x in items"),
            vec![
                TokenKind::If,
                ident("x"),
                TokenKind::In,
                ident("items"),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bool_and_none_literals() {
        assert_eq!(
            kinds("True False None"),
            vec![
                TokenKind::True,
                TokenKind::False,
                TokenKind::NoneKw,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_compound_operators() {
        assert_eq!(
            kinds("x //= 2"),
            vec![
                ident("x"),
                TokenKind::SlashSlashEq,
                TokenKind::IntLit(2),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("x **= 2"),
            vec![
                ident("x"),
                TokenKind::StarStarEq,
                TokenKind::IntLit(2),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            kinds("a <= b != c"),
            vec![
                ident("a"),
                TokenKind::LessEq,
                ident("b"),
                TokenKind::BangEq,
                ident("c"),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lone_bang_is_unknown() {
        assert_eq!(
            kinds("!"),
            vec![TokenKind::Unknown('!'), TokenKind::Newline, TokenKind::Eof]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""a\nb\tc""#),
            vec![
                TokenKind::StringLit("a\nb\tc".to_string()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_hex_and_unicode_escapes() {
        assert_eq!(
            kinds(r#""\x41\u00e9""#),
            vec![
                TokenKind::StringLit("A\u{e9}".to_string()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unknown_escape_passes_through() {
        assert_eq!(
            kinds(r#""\q""#),
            vec![
                TokenKind::StringLit("\\q".to_string()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_single_quoted_string() {
        assert_eq!(
            kinds("'hola'"),
            vec![
                TokenKind::StringLit("hola".to_string()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string_keeps_text() {
        assert_eq!(
            kinds("\"abc"),
            vec![
                TokenKind::StringLit("abc".to_string()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            kinds("x = 1  # the answer\n# full line comment\ny = 2"),
            vec![
                ident("x"),
                TokenKind::Eq,
                TokenKind::IntLit(1),
                TokenKind::Newline,
                ident("y"),
                TokenKind::Eq,
                TokenKind::IntLit(2),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_indentation_tokens() {
        let source = "if x:\n    y = 1\nz = 2";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::If,
                ident("x"),
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::Indent,
                ident("y"),
                TokenKind::Eq,
                TokenKind::IntLit(1),
                TokenKind::Newline,
                TokenKind::Dedent,
                ident("z"),
                TokenKind::Eq,
                TokenKind::IntLit(2),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_nested_dedents_at_eof() {
        let source = "if a:\n    if b:\n        x = 1";
        let tokens = kinds(source);
        let dedents = tokens
            .iter()
            .filter(|k| **k == TokenKind::Dedent)
            .count();
        assert_eq!(dedents, 2);
        assert_eq!(tokens.last(), Some(&TokenKind::Eof));
    }

    #[test]
    fn test_blank_lines_do_not_dedent() {
        let source = "if x:\n    a = 1\n\n    b = 2";
        let tokens = kinds(source);
        let indents = tokens.iter().filter(|k| **k == TokenKind::Indent).count();
        assert_eq!(indents, 1, "blank line must not close the block");
    }

    #[test]
    fn test_inconsistent_dedent_is_lenient() {
        // Dedenting to a width that matches no open level closes down
        // to the nearest enclosing level without an error.
        let source = "if x:\n        a = 1\n    b = 2";
        let tokens = kinds(source);
        assert!(tokens.contains(&TokenKind::Indent));
        assert!(tokens.contains(&TokenKind::Dedent));
        assert_eq!(tokens.last(), Some(&TokenKind::Eof));
    }

    #[test]
    fn test_newline_suppressed_in_brackets() {
        let source = "x = [1,\n     2]";
        let tokens = kinds(source);
        let newlines = tokens
            .iter()
            .filter(|k| **k == TokenKind::Newline)
            .count();
        assert_eq!(newlines, 1, "only the final newline should survive");
    }

    #[test]
    fn test_fstring_with_interpolation() {
        assert_eq!(
            kinds("f\"hi {name}!\""),
            vec![
                TokenKind::FStringStart("hi ".to_string()),
                TokenKind::InterpolationStart,
                ident("name"),
                TokenKind::InterpolationEnd,
                TokenKind::FStringEnd("!".to_string()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_fstring_multiple_interpolations() {
        assert_eq!(
            kinds("f\"{a} y {b}\""),
            vec![
                TokenKind::FStringStart(String::new()),
                TokenKind::InterpolationStart,
                ident("a"),
                TokenKind::InterpolationEnd,
                TokenKind::FStringPart(" y ".to_string()),
                TokenKind::InterpolationStart,
                ident("b"),
                TokenKind::InterpolationEnd,
                TokenKind::FStringEnd(String::new()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_fstring_expression_inside() {
        assert_eq!(
            kinds("f\"{x + 1}\""),
            vec![
                TokenKind::FStringStart(String::new()),
                TokenKind::InterpolationStart,
                ident("x"),
                TokenKind::Plus,
                TokenKind::IntLit(1),
                TokenKind::InterpolationEnd,
                TokenKind::FStringEnd(String::new()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_fstring_without_braces_is_plain_string() {
        assert_eq!(
            kinds("f\"hello\""),
            vec![
                TokenKind::StringLit("hello".to_string()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_fstring_doubled_braces_are_literal() {
        assert_eq!(
            kinds("f\"{{x}}\""),
            vec![
                TokenKind::StringLit("{x}".to_string()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_f_identifier_without_quote_is_identifier() {
        assert_eq!(
            kinds("f = 1"),
            vec![
                ident("f"),
                TokenKind::Eq,
                TokenKind::IntLit(1),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unknown_char_tokens() {
        assert_eq!(
            kinds("x @ y"),
            vec![
                ident("x"),
                TokenKind::Unknown('@'),
                ident("y"),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_only_comments_and_blanks() {
        assert_eq!(kinds("# hello\n\n  # world\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            kinds("x = 1\r\ny = 2\r\n"),
            vec![
                ident("x"),
                TokenKind::Eq,
                TokenKind::IntLit(1),
                TokenKind::Newline,
                ident("y"),
                TokenKind::Eq,
                TokenKind::IntLit(2),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_spans_track_columns() {
        let tokens = Lexer::new("x = 10").tokenize();
        assert_eq!(tokens[0].span, Span::new(1, 1, 1, 1));
        assert_eq!(tokens[1].span, Span::new(1, 3, 1, 3));
        assert_eq!(tokens[2].span, Span::new(1, 5, 1, 6));
    }

    #[test]
    fn test_spans_track_lines() {
        let tokens = Lexer::new("a = 1\nbb = 2").tokenize();
        let bb = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Identifier("bb".to_string()))
            .unwrap();
        assert_eq!(bb.span, Span::new(2, 1, 2, 2));
    }

    #[test]
    fn test_dict_literal_braces() {
        assert_eq!(
            kinds("{\"a\": 1}"),
            vec![
                TokenKind::LBrace,
                TokenKind::StringLit("a".to_string()),
                TokenKind::Colon,
                TokenKind::IntLit(1),
                TokenKind::RBrace,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }
}
