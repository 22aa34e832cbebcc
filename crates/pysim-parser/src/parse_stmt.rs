//! Statement parsing: dispatch, assignments, control flow, definitions.

use crate::parser::{ParseResult, Parser};
use pysim_lexer::TokenKind;
use crate::parser::ParseIssue;
use pysim_types::ast::{
    AssignStmt, AugAssignStmt, AugOp, Block, ClassDef, Expr, ExprKind, ExprStmt, ForStmt, FuncDef,
    Ident, IfBranch, IfStmt, ImportStmt, ReturnStmt, Stmt, WhileStmt,
};
use pysim_types::Span;

impl<'src> Parser<'src> {
    /// Parse one statement. Total: failures become recovery nodes.
    pub(crate) fn parse_stmt(&mut self) -> Stmt {
        let start = self.current_span();
        let result = match self.peek_kind().clone() {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Def => self.parse_func_def(),
            TokenKind::Class => self.parse_class(),
            TokenKind::Import => self.parse_import(),
            TokenKind::From => self.parse_from_import(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Pass => {
                self.advance();
                self.expect_end_of_line().map(|()| Stmt::Pass(start))
            }
            kind if starts_expr(&kind) => self.parse_simple_line(),
            // The first token opens no statement form. The line is
            // echoed back as an unprocessed-line annotation.
            _ => return self.unrecognized_stmt(start),
        };
        match result {
            Ok(stmt) => stmt,
            Err(issue) => self.invalid_stmt(issue, start),
        }
    }

    // ── Simple lines: assignment, compound assignment, expression ──

    /// A line that begins with an expression. Decides between plain
    /// assignment, compound assignment, and a bare expression statement.
    fn parse_simple_line(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        let mut exprs = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            exprs.push(self.parse_expr()?);
        }

        if self.eat(&TokenKind::Eq) {
            return self.finish_assign(exprs, start);
        }

        if let Some(op) = aug_op(self.peek_kind()) {
            self.advance();
            return self.finish_aug_assign(exprs, op, start);
        }

        let expr = if exprs.len() == 1 {
            match exprs.pop() {
                Some(e) => e,
                None => return Err(self.issue_here("expected an expression")),
            }
        } else {
            let span = start.merge(self.previous_span());
            Expr::new(ExprKind::TupleLit(exprs), span)
        };
        self.expect_end_of_line()?;
        let span = start.merge(self.previous_span());
        Ok(Stmt::Expr(ExprStmt { expr, span }))
    }

    fn finish_assign(&mut self, targets: Vec<Expr>, start: Span) -> ParseResult<Stmt> {
        let targets = self.targets_to_idents(targets)?;
        let mut values = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            values.push(self.parse_expr()?);
        }
        self.expect_end_of_line()?;
        Ok(Stmt::Assign(AssignStmt {
            targets,
            values,
            span: start.merge(self.previous_span()),
        }))
    }

    fn finish_aug_assign(
        &mut self,
        mut targets: Vec<Expr>,
        op: AugOp,
        start: Span,
    ) -> ParseResult<Stmt> {
        if targets.len() != 1 {
            return Err(self.issue_here("compound assignment takes a single target"));
        }
        let target = match targets.pop() {
            Some(e) => e,
            None => return Err(self.issue_here("expected an assignment target")),
        };
        let target = match target.kind {
            ExprKind::Identifier(name) => Ident::new(name, target.span),
            _ => return Err(self.issue_here("compound assignment target must be a variable name")),
        };
        let value = self.parse_expr()?;
        self.expect_end_of_line()?;
        Ok(Stmt::AugAssign(AugAssignStmt {
            target,
            op,
            value,
            span: start.merge(self.previous_span()),
        }))
    }

    /// Assignment targets must be plain variable names.
    fn targets_to_idents(&mut self, targets: Vec<Expr>) -> ParseResult<Vec<Ident>> {
        let mut idents = Vec::with_capacity(targets.len());
        for target in targets {
            match target.kind {
                ExprKind::Identifier(name) => idents.push(Ident::new(name, target.span)),
                _ => {
                    return Err(ParseIssue {
                        message: "assignment target must be a variable name".to_string(),
                        span: target.span,
                    })
                }
            }
        }
        Ok(idents)
    }

    // ── Control flow ─────────────────────────────────────────

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();
        let condition = self.parse_expr()?;
        let body = self.parse_block()?;
        let mut branches = vec![IfBranch {
            span: start.merge(body.span),
            condition,
            body,
        }];

        while self.check(&TokenKind::Elif) {
            let branch_start = self.current_span();
            self.advance();
            let condition = self.parse_expr()?;
            let body = self.parse_block()?;
            branches.push(IfBranch {
                span: branch_start.merge(body.span),
                condition,
                body,
            });
        }

        let else_body = if self.check(&TokenKind::Else) {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };

        let end = else_body
            .as_ref()
            .map(|b| b.span)
            .or_else(|| branches.last().map(|b| b.span))
            .unwrap_or(start);
        Ok(Stmt::If(IfStmt {
            branches,
            else_body,
            span: start.merge(end),
        }))
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();
        let condition = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::While(WhileStmt {
            span: start.merge(body.span),
            condition,
            body,
        }))
    }

    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();
        let target = self.expect_identifier()?;
        self.expect(&TokenKind::In)?;
        let iterable = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::For(ForStmt {
            span: start.merge(body.span),
            target,
            iterable,
            body,
        }))
    }

    // ── Definitions ──────────────────────────────────────────

    fn parse_func_def(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            params.push(self.expect_identifier()?);
            while self.eat(&TokenKind::Comma) {
                if self.check(&TokenKind::RParen) {
                    break;
                }
                params.push(self.expect_identifier()?);
            }
        }
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::FuncDef(FuncDef {
            span: start.merge(body.span),
            name,
            params,
            body,
        }))
    }

    /// Classes are inert stubs: the name is recorded and the suite is
    /// parsed for its layout, then discarded.
    fn parse_class(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();
        let name = self.expect_identifier()?;
        if self.eat(&TokenKind::LParen) {
            // Base class list: accepted and ignored.
            while !self.check(&TokenKind::RParen) && !self.at_end() {
                self.advance();
            }
            self.expect(&TokenKind::RParen)?;
        }
        let body = self.parse_block()?;
        Ok(Stmt::ClassDef(ClassDef {
            span: start.merge(body.span),
            name,
        }))
    }

    // ── Imports and return ───────────────────────────────────

    fn parse_import(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();
        let module = self.expect_identifier()?;
        // `import a, b` keeps only the first module, matching the
        // single-module form the original engine accepted.
        while self.eat(&TokenKind::Comma) {
            self.expect_identifier()?;
        }
        self.expect_end_of_line()?;
        Ok(Stmt::Import(ImportStmt {
            span: start.merge(self.previous_span()),
            module,
            names: Vec::new(),
        }))
    }

    fn parse_from_import(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();
        let module = self.expect_identifier()?;
        self.expect(&TokenKind::Import)?;
        let mut names = vec![self.expect_identifier()?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_identifier()?);
        }
        self.expect_end_of_line()?;
        Ok(Stmt::Import(ImportStmt {
            span: start.merge(self.previous_span()),
            module,
            names,
        }))
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();
        let value = if matches!(
            self.peek_kind(),
            TokenKind::Newline | TokenKind::Eof | TokenKind::Dedent
        ) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect_end_of_line()?;
        Ok(Stmt::Return(ReturnStmt {
            span: start.merge(self.previous_span()),
            value,
        }))
    }

    // ── Suites ───────────────────────────────────────────────

    /// `: NEWLINE INDENT stmt+ DEDENT`, or `: simple_stmt` inline.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        self.expect(&TokenKind::Colon)?;
        let start = self.current_span();

        if self.eat(&TokenKind::Newline) {
            self.expect(&TokenKind::Indent)?;
            let mut stmts = Vec::new();
            loop {
                match self.peek_kind() {
                    TokenKind::Newline => {
                        self.advance();
                    }
                    TokenKind::Dedent => {
                        self.advance();
                        break;
                    }
                    TokenKind::Eof => break,
                    _ => stmts.push(self.parse_stmt()),
                }
            }
            let span = start.merge(self.previous_span());
            Ok(Block { stmts, span })
        } else {
            // Inline suite: a single simple statement on the same line.
            let stmt = self.parse_stmt();
            let span = start.merge(self.previous_span());
            Ok(Block {
                stmts: vec![stmt],
                span,
            })
        }
    }
}

/// Tokens that can begin an expression (and thus a simple line).
pub(crate) fn starts_expr(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::IntLit(_)
            | TokenKind::FloatLit(_)
            | TokenKind::StringLit(_)
            | TokenKind::FStringStart(_)
            | TokenKind::True
            | TokenKind::False
            | TokenKind::NoneKw
            | TokenKind::Identifier(_)
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::LBrace
            | TokenKind::Minus
            | TokenKind::Not
    )
}

fn aug_op(kind: &TokenKind) -> Option<AugOp> {
    Some(match kind {
        TokenKind::PlusEq => AugOp::Add,
        TokenKind::MinusEq => AugOp::Sub,
        TokenKind::StarEq => AugOp::Mul,
        TokenKind::StarStarEq => AugOp::Pow,
        TokenKind::SlashEq => AugOp::Div,
        TokenKind::SlashSlashEq => AugOp::FloorDiv,
        TokenKind::PercentEq => AugOp::Mod,
        _ => return None,
    })
}
