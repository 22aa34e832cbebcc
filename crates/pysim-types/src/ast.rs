//! AST node types for the restricted Python subset PySim executes.
//!
//! Every node carries a [`Span`] for error reporting and raw-line recovery.
//! Large recursive types are boxed to keep enum sizes reasonable. Fields
//! preserve source order throughout.

use crate::Span;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete parsed snippet: the top-level statement sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// An indented suite of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `a = expr` or `a, b = expr1, expr2` (arity checked at run time).
    Assign(AssignStmt),
    /// `a += expr` and the other compound operators.
    AugAssign(AugAssignStmt),
    /// A bare expression line. Non-`None` results are echoed to output.
    Expr(ExprStmt),
    /// `if cond: ... [elif cond: ...]* [else: ...]`
    If(IfStmt),
    /// `while cond: ...`
    While(WhileStmt),
    /// `for target in iterable: ...`
    For(ForStmt),
    /// `def name(params): ...`
    FuncDef(FuncDef),
    /// `class Name: ...` — recorded as an inert stub, body discarded.
    ClassDef(ClassDef),
    /// `import module` / `from module import a, b`
    Import(ImportStmt),
    /// `return [expr]`
    Return(ReturnStmt),
    /// `pass`
    Pass(Span),
    /// A line whose first token starts no known statement form.
    /// Echoed back as a `# unprocessed line:` annotation, never an error.
    Unrecognized { text: String, span: Span },
    /// A line that committed to a statement form but failed to parse.
    /// Raises a runtime failure when reached.
    Invalid {
        text: String,
        message: String,
        span: Span,
    },
}

/// `targets... = values...`
///
/// Targets are plain identifiers only; the original engine rejected anything
/// else as an invalid variable name and so do we.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub targets: Vec<Ident>,
    pub values: Vec<Expr>,
    pub span: Span,
}

/// Compound assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AugAssignStmt {
    pub target: Ident,
    pub op: AugOp,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

/// One `if`/`elif` arm: condition plus suite.
#[derive(Debug, Clone, PartialEq)]
pub struct IfBranch {
    pub condition: Expr,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    /// The `if` arm followed by any `elif` arms, in source order.
    pub branches: Vec<IfBranch>,
    pub else_body: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub target: Ident,
    pub iterable: Expr,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: Ident,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub module: Ident,
    /// Empty for `import module`; the requested names for `from ... import`.
    pub names: Vec<Ident>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    IntLit(i64),
    FloatLit(f64),
    StringLit(String),
    /// f-string: literal runs interleaved with embedded expressions.
    FString(Vec<StringPart>),
    BoolLit(bool),
    NoneLit,

    ListLit(Vec<Expr>),
    DictLit(Vec<(Expr, Expr)>),
    TupleLit(Vec<Expr>),

    Identifier(String),

    /// `callee(args...)` — covers `print(..)`, builtins, user routines,
    /// and method/module calls via an `Attribute` callee.
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// `base[index]`
    Index { base: Box<Expr>, index: Box<Expr> },
    /// `base.name`
    Attribute { base: Box<Expr>, name: Ident },

    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// `then if condition else orelse`
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        orelse: Box<Expr>,
    },

    Paren(Box<Expr>),
}

/// One segment of an f-string.
#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    Literal(String),
    Expr(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    And,
    Or,
    In,
    NotIn,
}

impl BinOp {
    /// Source text of the operator, for error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::FloorDiv => "//",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::Greater => ">",
            BinOp::LessEq => "<=",
            BinOp::GreaterEq => ">=",
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::In => "in",
            BinOp::NotIn => "not in",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl AugOp {
    /// The underlying binary operator this compound assignment applies.
    pub fn bin_op(self) -> BinOp {
        match self {
            AugOp::Add => BinOp::Add,
            AugOp::Sub => BinOp::Sub,
            AugOp::Mul => BinOp::Mul,
            AugOp::Div => BinOp::Div,
            AugOp::FloorDiv => BinOp::FloorDiv,
            AugOp::Mod => BinOp::Mod,
            AugOp::Pow => BinOp::Pow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aug_op_maps_to_bin_op() {
        assert_eq!(AugOp::Add.bin_op(), BinOp::Add);
        assert_eq!(AugOp::FloorDiv.bin_op(), BinOp::FloorDiv);
        assert_eq!(AugOp::Pow.bin_op(), BinOp::Pow);
    }

    #[test]
    fn test_bin_op_symbols() {
        assert_eq!(BinOp::FloorDiv.symbol(), "//");
        assert_eq!(BinOp::NotIn.symbol(), "not in");
        assert_eq!(BinOp::Pow.symbol(), "**");
    }

    #[test]
    fn test_ident_new() {
        let id = Ident::new("total", Span::point(1, 1));
        assert_eq!(id.name, "total");
    }
}
