//! Integration tests for the PySim parser.
//!
//! Covers statement dispatch, expression precedence, and the
//! statement-level leniency policy (unrecognized vs. invalid lines).

use pysim_parser::parse;
use pysim_types::ast::{BinOp, Expr, ExprKind, Stmt, StringPart, UnaryOp};

// ── Helpers ──────────────────────────────────────────────────

fn stmts(source: &str) -> Vec<Stmt> {
    parse(source).stmts
}

/// Parse a single-statement source and return that statement.
fn stmt(source: &str) -> Stmt {
    let mut all = stmts(source);
    assert_eq!(all.len(), 1, "expected one statement in {source:?}");
    all.remove(0)
}

/// Extract the expression of a bare expression statement.
fn expr(source: &str) -> Expr {
    match stmt(source) {
        Stmt::Expr(e) => e.expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn binary_parts(e: &Expr) -> (&Expr, BinOp, &Expr) {
    match &e.kind {
        ExprKind::Binary { left, op, right } => (left, *op, right),
        other => panic!("expected binary expression, got {other:?}"),
    }
}

// ── Statements ───────────────────────────────────────────────

#[test]
fn test_simple_assignment() {
    let Stmt::Assign(assign) = stmt("x = 5") else {
        panic!("expected assignment");
    };
    assert_eq!(assign.targets.len(), 1);
    assert_eq!(assign.targets[0].name, "x");
    assert_eq!(assign.values.len(), 1);
    assert_eq!(assign.values[0].kind, ExprKind::IntLit(5));
}

#[test]
fn test_multi_target_assignment() {
    let Stmt::Assign(assign) = stmt("a, b = 1, 2") else {
        panic!("expected assignment");
    };
    assert_eq!(assign.targets.len(), 2);
    assert_eq!(assign.values.len(), 2);
}

#[test]
fn test_augmented_assignment() {
    let Stmt::AugAssign(aug) = stmt("total += 1") else {
        panic!("expected augmented assignment");
    };
    assert_eq!(aug.target.name, "total");
}

#[test]
fn test_if_elif_else_chain() {
    let source = "if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3";
    let Stmt::If(if_stmt) = stmt(source) else {
        panic!("expected if statement");
    };
    assert_eq!(if_stmt.branches.len(), 2);
    assert!(if_stmt.else_body.is_some());
    assert_eq!(if_stmt.branches[0].body.stmts.len(), 1);
}

#[test]
fn test_inline_suite() {
    let Stmt::If(if_stmt) = stmt("if x: y = 1") else {
        panic!("expected if statement");
    };
    assert_eq!(if_stmt.branches[0].body.stmts.len(), 1);
    assert!(matches!(if_stmt.branches[0].body.stmts[0], Stmt::Assign(_)));
}

#[test]
fn test_for_loop() {
    let source = "for i in range(3):\n    print(i)";
    let Stmt::For(for_stmt) = stmt(source) else {
        panic!("expected for statement");
    };
    assert_eq!(for_stmt.target.name, "i");
    assert!(matches!(for_stmt.iterable.kind, ExprKind::Call { .. }));
}

#[test]
fn test_func_def_params() {
    let source = "def greet(name, times):\n    print(name)";
    let Stmt::FuncDef(def) = stmt(source) else {
        panic!("expected function definition");
    };
    assert_eq!(def.name.name, "greet");
    let params: Vec<&str> = def.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(params, vec!["name", "times"]);
}

#[test]
fn test_class_body_discarded() {
    let source = "class Persona:\n    def saludar(self):\n        print(1)";
    let Stmt::ClassDef(class) = stmt(source) else {
        panic!("expected class definition");
    };
    assert_eq!(class.name.name, "Persona");
}

#[test]
fn test_import_forms() {
    let Stmt::Import(import) = stmt("import math") else {
        panic!("expected import");
    };
    assert_eq!(import.module.name, "math");
    assert!(import.names.is_empty());

    let Stmt::Import(import) = stmt("from math import sqrt, pi") else {
        panic!("expected import");
    };
    assert_eq!(import.module.name, "math");
    let names: Vec<&str> = import.names.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["sqrt", "pi"]);
}

#[test]
fn test_return_with_and_without_value() {
    let source = "def f():\n    return 1\ndef g():\n    return";
    let all = stmts(source);
    assert_eq!(all.len(), 2);
    let Stmt::FuncDef(f) = &all[0] else {
        panic!("expected def");
    };
    assert!(matches!(f.body.stmts[0], Stmt::Return(ref r) if r.value.is_some()));
    let Stmt::FuncDef(g) = &all[1] else {
        panic!("expected def");
    };
    assert!(matches!(g.body.stmts[0], Stmt::Return(ref r) if r.value.is_none()));
}

// ── Leniency ─────────────────────────────────────────────────

#[test]
fn test_unknown_first_token_degrades_to_unrecognized() {
    let Stmt::Unrecognized { text, .. } = stmt("??? what") else {
        panic!("expected unrecognized statement");
    };
    assert_eq!(text, "??? what");
}

#[test]
fn test_committed_form_becomes_invalid() {
    let Stmt::Invalid { text, message, .. } = stmt("if True print(1)") else {
        panic!("expected invalid statement");
    };
    assert_eq!(text, "if True print(1)");
    assert!(!message.is_empty());
}

#[test]
fn test_invalid_header_skips_its_suite() {
    let source = "if True\n    x = 1\ny = 2";
    let all = stmts(source);
    assert_eq!(all.len(), 2);
    assert!(matches!(all[0], Stmt::Invalid { .. }));
    assert!(matches!(all[1], Stmt::Assign(_)));
}

#[test]
fn test_broken_line_does_not_poison_neighbors() {
    let source = "x = 1\nx = = 2\nprint(x)";
    let all = stmts(source);
    assert_eq!(all.len(), 3);
    assert!(matches!(all[0], Stmt::Assign(_)));
    assert!(matches!(all[1], Stmt::Invalid { .. }));
    assert!(matches!(all[2], Stmt::Expr(_)));
}

#[test]
fn test_non_identifier_assignment_target_is_invalid() {
    assert!(matches!(stmt("nums[0] = 5"), Stmt::Invalid { .. }));
}

#[test]
fn test_chained_comparison_is_invalid() {
    assert!(matches!(stmt("1 < 2 < 3"), Stmt::Invalid { .. }));
}

// ── Expression precedence ────────────────────────────────────

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let e = expr("1 + 2 * 3");
    let (left, op, right) = binary_parts(&e);
    assert_eq!(op, BinOp::Add);
    assert_eq!(left.kind, ExprKind::IntLit(1));
    let (_, inner_op, _) = binary_parts(right);
    assert_eq!(inner_op, BinOp::Mul);
}

#[test]
fn test_power_is_right_associative() {
    let e = expr("2 ** 3 ** 2");
    let (left, op, right) = binary_parts(&e);
    assert_eq!(op, BinOp::Pow);
    assert_eq!(left.kind, ExprKind::IntLit(2));
    let (_, inner_op, _) = binary_parts(right);
    assert_eq!(inner_op, BinOp::Pow);
}

#[test]
fn test_unary_minus_binds_looser_than_power() {
    let e = expr("-2 ** 2");
    let ExprKind::Unary { op, operand } = &e.kind else {
        panic!("expected unary expression");
    };
    assert_eq!(*op, UnaryOp::Neg);
    let (_, inner_op, _) = binary_parts(operand);
    assert_eq!(inner_op, BinOp::Pow);
}

#[test]
fn test_comparison_binds_looser_than_arithmetic() {
    let e = expr("1 + 1 == 2");
    let (_, op, _) = binary_parts(&e);
    assert_eq!(op, BinOp::Eq);
}

#[test]
fn test_not_binds_looser_than_comparison() {
    let e = expr("not 1 == 2");
    let ExprKind::Unary { op, operand } = &e.kind else {
        panic!("expected unary expression");
    };
    assert_eq!(*op, UnaryOp::Not);
    let (_, inner_op, _) = binary_parts(operand);
    assert_eq!(inner_op, BinOp::Eq);
}

#[test]
fn test_and_binds_tighter_than_or() {
    let e = expr("a or b and c");
    let (_, op, right) = binary_parts(&e);
    assert_eq!(op, BinOp::Or);
    let (_, inner_op, _) = binary_parts(right);
    assert_eq!(inner_op, BinOp::And);
}

#[test]
fn test_conditional_expression_shape() {
    let e = expr("1 if x > 0 else -1");
    let ExprKind::Conditional {
        condition, then, ..
    } = &e.kind
    else {
        panic!("expected conditional expression");
    };
    assert_eq!(then.kind, ExprKind::IntLit(1));
    let (_, op, _) = binary_parts(condition);
    assert_eq!(op, BinOp::Greater);
}

#[test]
fn test_membership_operators() {
    let (_, op, _) = binary_parts(&expr("x in items"));
    assert_eq!(op, BinOp::In);
    let (_, op, _) = binary_parts(&expr("x not in items"));
    assert_eq!(op, BinOp::NotIn);
}

#[test]
fn test_postfix_chain() {
    let e = expr("data[0].upper()");
    let ExprKind::Call { callee, args } = &e.kind else {
        panic!("expected call");
    };
    assert!(args.is_empty());
    let ExprKind::Attribute { base, name } = &callee.kind else {
        panic!("expected attribute callee");
    };
    assert_eq!(name.name, "upper");
    assert!(matches!(base.kind, ExprKind::Index { .. }));
}

#[test]
fn test_collection_literals() {
    assert!(matches!(expr("[1, 2, 3]").kind, ExprKind::ListLit(ref v) if v.len() == 3));
    assert!(matches!(expr("{\"a\": 1}").kind, ExprKind::DictLit(ref v) if v.len() == 1));
    assert!(matches!(expr("(1, 2)").kind, ExprKind::TupleLit(ref v) if v.len() == 2));
    assert!(matches!(expr("(1)").kind, ExprKind::Paren(_)));
}

#[test]
fn test_fstring_parts() {
    let e = expr("f\"Hola {nombre}!\"");
    let ExprKind::FString(parts) = &e.kind else {
        panic!("expected f-string");
    };
    assert_eq!(parts.len(), 3);
    assert!(matches!(parts[0], StringPart::Literal(ref s) if s == "Hola "));
    assert!(matches!(parts[1], StringPart::Expr(_)));
    assert!(matches!(parts[2], StringPart::Literal(ref s) if s == "!"));
}

#[test]
fn test_multiline_list_literal() {
    let Stmt::Assign(assign) = stmt("nums = [1,\n        2,\n        3]") else {
        panic!("expected assignment");
    };
    assert!(matches!(assign.values[0].kind, ExprKind::ListLit(ref v) if v.len() == 3));
}

#[test]
fn test_nested_blocks() {
    let source = "for i in items:\n    if i:\n        print(i)\n    print(0)";
    let Stmt::For(for_stmt) = stmt(source) else {
        panic!("expected for statement");
    };
    assert_eq!(for_stmt.body.stmts.len(), 2);
    assert!(matches!(for_stmt.body.stmts[0], Stmt::If(_)));
}
