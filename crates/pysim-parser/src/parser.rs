//! Core parser infrastructure: token cursor, issue reporting, recovery.

use pysim_lexer::{Lexer, Token, TokenKind};
use pysim_types::ast::{Ident, Program, Stmt};
use pysim_types::{SourceText, Span};

/// A problem found while a statement was being parsed.
///
/// Issues never escape the parser. A statement that raises one is
/// replaced by a [`Stmt::Invalid`] node carrying the message, and the
/// cursor skips to the next line.
#[derive(Debug, Clone)]
pub(crate) struct ParseIssue {
    pub message: String,
    pub span: Span,
}

pub(crate) type ParseResult<T> = Result<T, ParseIssue>;

/// Parse a complete snippet. Never fails.
pub fn parse(source: &str) -> Program {
    let tokens = Lexer::new(source).tokenize();
    let text = SourceText::new(source);
    Parser::new(tokens, &text).parse_program()
}

/// The PySim parser.
///
/// Consumes a token stream produced by the lexer and builds an AST.
/// Unparseable lines are captured as recovery nodes instead of errors.
pub struct Parser<'src> {
    /// The token stream.
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    /// Source text, for recovering the raw text of broken lines.
    source: &'src SourceText,
}

impl<'src> Parser<'src> {
    pub fn new(tokens: Vec<Token>, source: &'src SourceText) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
        }
    }

    /// Parse the whole token stream into a program.
    pub fn parse_program(mut self) -> Program {
        let mut stmts = Vec::new();
        while !self.at_end() {
            // Stray layout tokens at the top level (a snippet whose
            // first line is indented, for example) are ignored.
            if matches!(
                self.peek_kind(),
                TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent
            ) {
                self.advance();
                continue;
            }
            stmts.push(self.parse_stmt());
        }
        let span = match (stmts.first(), stmts.last()) {
            (Some(first), Some(last)) => stmt_span(first).merge(stmt_span(last)),
            _ => Span::point(1, 1),
        };
        Program { stmts, span }
    }

    // ── Token cursor ─────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("token stream should end with Eof")
        })
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Returns the previously consumed token's span.
    pub(crate) fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::point(1, 1)
        }
    }

    /// Returns the span of the current token.
    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Returns `true` if the current token is `Eof`.
    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    /// Check if the current token matches the given kind exactly.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Look ahead by `n` tokens from the current position.
    pub(crate) fn look_ahead(&self, n: usize) -> &TokenKind {
        let idx = self.pos + n;
        self.tokens
            .get(idx)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    // ── Expectations ─────────────────────────────────────────

    /// Consume a token of the given kind or raise an issue.
    pub(crate) fn expect(&mut self, expected: &TokenKind) -> ParseResult<Token> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(self.issue_here(format!(
                "expected '{expected}', found '{}'",
                self.peek_kind()
            )))
        }
    }

    /// Consume an identifier token or raise an issue.
    pub(crate) fn expect_identifier(&mut self) -> ParseResult<Ident> {
        match self.peek_kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let token = self.advance();
                Ok(Ident::new(name, token.span))
            }
            other => Err(self.issue_here(format!("expected a name, found '{other}'"))),
        }
    }

    /// Consume the end of a simple statement. A `Newline` is eaten;
    /// `Eof` and `Dedent` are accepted without consuming.
    pub(crate) fn expect_end_of_line(&mut self) -> ParseResult<()> {
        match self.peek_kind() {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof | TokenKind::Dedent => Ok(()),
            other => Err(self.issue_here(format!("unexpected '{other}'"))),
        }
    }

    pub(crate) fn issue_here(&self, message: impl Into<String>) -> ParseIssue {
        ParseIssue {
            message: message.into(),
            span: self.current_span(),
        }
    }

    // ── Recovery ─────────────────────────────────────────────

    /// Raw trimmed text of the source line a span starts on.
    pub(crate) fn line_text(&self, span: Span) -> String {
        self.source
            .line(span.start_line)
            .map(|l| l.trim().to_string())
            .unwrap_or_default()
    }

    /// Build an [`Stmt::Invalid`] for the line at `span` and skip the
    /// rest of that line, including any suite that hangs off it.
    pub(crate) fn invalid_stmt(&mut self, issue: ParseIssue, start: Span) -> Stmt {
        let stmt = Stmt::Invalid {
            text: self.line_text(start),
            message: issue.message,
            span: start.merge(issue.span),
        };
        self.recover_line();
        stmt
    }

    /// Build an [`Stmt::Unrecognized`] for the line at `span` and skip
    /// the rest of that line.
    pub(crate) fn unrecognized_stmt(&mut self, start: Span) -> Stmt {
        let stmt = Stmt::Unrecognized {
            text: self.line_text(start),
            span: start,
        };
        self.recover_line();
        stmt
    }

    /// Skip to the start of the next statement: consume through the
    /// next `Newline`, then skip a whole indented suite if one follows.
    pub(crate) fn recover_line(&mut self) {
        while !self.at_end() {
            if self.check(&TokenKind::Dedent) {
                return;
            }
            if self.eat(&TokenKind::Newline) {
                break;
            }
            self.advance();
        }
        if self.check(&TokenKind::Indent) {
            self.skip_suite();
        }
    }

    /// Consume a balanced `Indent`..`Dedent` region.
    fn skip_suite(&mut self) {
        let mut depth = 0usize;
        while !self.at_end() {
            match self.peek_kind() {
                TokenKind::Indent => depth += 1,
                TokenKind::Dedent => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }
}

pub(crate) fn stmt_span(stmt: &Stmt) -> Span {
    match stmt {
        Stmt::Assign(s) => s.span,
        Stmt::AugAssign(s) => s.span,
        Stmt::Expr(s) => s.span,
        Stmt::If(s) => s.span,
        Stmt::While(s) => s.span,
        Stmt::For(s) => s.span,
        Stmt::FuncDef(s) => s.span,
        Stmt::ClassDef(s) => s.span,
        Stmt::Import(s) => s.span,
        Stmt::Return(s) => s.span,
        Stmt::Pass(span) => *span,
        Stmt::Unrecognized { span, .. } => *span,
        Stmt::Invalid { span, .. } => *span,
    }
}
