//! Expression parsing, one method per precedence level.
//!
//! Lowest to highest: conditional (`x if c else y`), `or`, `and`,
//! `not`, comparison and membership (non-chaining), `+ -`,
//! `* / // %`, unary `-`, `**` (right-associative), postfix
//! (calls, indexing, attributes), primary.

use crate::parser::{ParseResult, Parser};
use pysim_lexer::TokenKind;
use pysim_types::ast::{BinOp, Expr, ExprKind, StringPart, UnaryOp};

impl<'src> Parser<'src> {
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_conditional()
    }

    /// `then if condition else orelse`
    fn parse_conditional(&mut self) -> ParseResult<Expr> {
        let then = self.parse_or()?;
        if !self.eat(&TokenKind::If) {
            return Ok(then);
        }
        let condition = self.parse_or()?;
        self.expect(&TokenKind::Else)?;
        let orelse = self.parse_conditional()?;
        let span = then.span.merge(orelse.span);
        Ok(Expr::new(
            ExprKind::Conditional {
                condition: Box::new(condition),
                then: Box::new(then),
                orelse: Box::new(orelse),
            },
            span,
        ))
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = binary(left, BinOp::Or, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_not()?;
        while self.eat(&TokenKind::And) {
            let right = self.parse_not()?;
            left = binary(left, BinOp::And, right);
        }
        Ok(left)
    }

    /// `not` binds looser than comparison: `not a == b` is `not (a == b)`.
    fn parse_not(&mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Not) {
            let start = self.current_span();
            self.advance();
            let operand = self.parse_not()?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                },
                span,
            ));
        }
        self.parse_comparison()
    }

    /// A single comparison or membership test. Chained comparisons
    /// (`a < b < c`) are not supported; the second operator is left
    /// in the stream and the statement fails there.
    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let left = self.parse_additive()?;
        let op = match self.peek_kind() {
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::BangEq => BinOp::NotEq,
            TokenKind::Less => BinOp::Less,
            TokenKind::Greater => BinOp::Greater,
            TokenKind::LessEq => BinOp::LessEq,
            TokenKind::GreaterEq => BinOp::GreaterEq,
            TokenKind::In => BinOp::In,
            TokenKind::Not if self.look_ahead(1) == &TokenKind::In => {
                self.advance();
                BinOp::NotIn
            }
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_additive()?;
        Ok(binary(left, op, right))
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(left, op, right);
        }
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::SlashSlash => BinOp::FloorDiv,
                TokenKind::Percent => BinOp::Mod,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_unary()?;
            left = binary(left, op, right);
        }
    }

    /// Unary minus. `-2 ** 2` parses as `-(2 ** 2)`.
    fn parse_unary(&mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Minus) {
            let start = self.current_span();
            self.advance();
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                },
                span,
            ));
        }
        self.parse_power()
    }

    /// `**` is right-associative and its right side admits a sign:
    /// `2 ** -3` and `2 ** 3 ** 2` both parse.
    fn parse_power(&mut self) -> ParseResult<Expr> {
        let base = self.parse_postfix()?;
        if !self.eat(&TokenKind::StarStar) {
            return Ok(base);
        }
        let exponent = self.parse_unary()?;
        Ok(binary(base, BinOp::Pow, exponent))
    }

    /// Calls, indexing and attribute access, applied left to right.
    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek_kind() {
                TokenKind::LParen => {
                    self.advance();
                    let args = self.parse_call_args()?;
                    let span = expr.span.merge(self.previous_span());
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expr()?;
                    self.expect(&TokenKind::RBracket)?;
                    let span = expr.span.merge(self.previous_span());
                    expr = Expr::new(
                        ExprKind::Index {
                            base: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                TokenKind::Dot => {
                    self.advance();
                    let name = self.expect_identifier()?;
                    let span = expr.span.merge(name.span);
                    expr = Expr::new(
                        ExprKind::Attribute {
                            base: Box::new(expr),
                            name,
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_call_args(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.check(&TokenKind::RParen) {
            self.advance();
            return Ok(args);
        }
        args.push(self.parse_expr()?);
        while self.eat(&TokenKind::Comma) {
            if self.check(&TokenKind::RParen) {
                break;
            }
            args.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    // ── Primaries ────────────────────────────────────────────

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let span = self.current_span();
        let kind = self.peek_kind().clone();
        match kind {
            TokenKind::IntLit(n) => {
                self.advance();
                Ok(Expr::new(ExprKind::IntLit(n), span))
            }
            TokenKind::FloatLit(n) => {
                self.advance();
                Ok(Expr::new(ExprKind::FloatLit(n), span))
            }
            TokenKind::StringLit(s) => {
                self.advance();
                Ok(Expr::new(ExprKind::StringLit(s), span))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::new(ExprKind::BoolLit(true), span))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::new(ExprKind::BoolLit(false), span))
            }
            TokenKind::NoneKw => {
                self.advance();
                Ok(Expr::new(ExprKind::NoneLit, span))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expr::new(ExprKind::Identifier(name), span))
            }
            TokenKind::FStringStart(text) => {
                self.advance();
                self.parse_fstring(text)
            }
            TokenKind::LParen => self.parse_paren_or_tuple(),
            TokenKind::LBracket => self.parse_list_literal(),
            TokenKind::LBrace => self.parse_dict_literal(),
            other => Err(self.issue_here(format!("expected an expression, found '{other}'"))),
        }
    }

    /// `(expr)` groups; `(a, b)` and `()` build tuples.
    fn parse_paren_or_tuple(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();
        self.advance();
        if self.eat(&TokenKind::RParen) {
            let span = start.merge(self.previous_span());
            return Ok(Expr::new(ExprKind::TupleLit(Vec::new()), span));
        }
        let first = self.parse_expr()?;
        if self.check(&TokenKind::Comma) {
            let mut items = vec![first];
            while self.eat(&TokenKind::Comma) {
                if self.check(&TokenKind::RParen) {
                    break;
                }
                items.push(self.parse_expr()?);
            }
            self.expect(&TokenKind::RParen)?;
            let span = start.merge(self.previous_span());
            return Ok(Expr::new(ExprKind::TupleLit(items), span));
        }
        self.expect(&TokenKind::RParen)?;
        let span = start.merge(self.previous_span());
        Ok(Expr::new(ExprKind::Paren(Box::new(first)), span))
    }

    fn parse_list_literal(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();
        self.advance();
        let mut items = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            items.push(self.parse_expr()?);
            while self.eat(&TokenKind::Comma) {
                if self.check(&TokenKind::RBracket) {
                    break;
                }
                items.push(self.parse_expr()?);
            }
        }
        self.expect(&TokenKind::RBracket)?;
        let span = start.merge(self.previous_span());
        Ok(Expr::new(ExprKind::ListLit(items), span))
    }

    fn parse_dict_literal(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();
        self.advance();
        let mut entries = Vec::new();
        if !self.check(&TokenKind::RBrace) {
            loop {
                let key = self.parse_expr()?;
                self.expect(&TokenKind::Colon)?;
                let value = self.parse_expr()?;
                entries.push((key, value));
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
                if self.check(&TokenKind::RBrace) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RBrace)?;
        let span = start.merge(self.previous_span());
        Ok(Expr::new(ExprKind::DictLit(entries), span))
    }

    /// Assemble an f-string from the lexer's segment tokens.
    fn parse_fstring(&mut self, head: String) -> ParseResult<Expr> {
        let start = self.previous_span();
        let mut parts = Vec::new();
        if !head.is_empty() {
            parts.push(StringPart::Literal(head));
        }
        loop {
            self.expect(&TokenKind::InterpolationStart)?;
            let expr = self.parse_expr()?;
            self.expect(&TokenKind::InterpolationEnd)?;
            parts.push(StringPart::Expr(expr));
            match self.peek_kind().clone() {
                TokenKind::FStringPart(text) => {
                    self.advance();
                    if !text.is_empty() {
                        parts.push(StringPart::Literal(text));
                    }
                }
                TokenKind::FStringEnd(text) => {
                    self.advance();
                    if !text.is_empty() {
                        parts.push(StringPart::Literal(text));
                    }
                    break;
                }
                other => {
                    return Err(self.issue_here(format!(
                        "unterminated f-string, found '{other}'"
                    )))
                }
            }
        }
        let span = start.merge(self.previous_span());
        Ok(Expr::new(ExprKind::FString(parts), span))
    }
}

fn binary(left: Expr, op: BinOp, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        span,
    )
}
