//! Statement and expression evaluation.
//!
//! One `Evaluator` owns every piece of mutable state: the variable
//! environment, the routine table, the class stub set, the import set,
//! the output buffer, the input source, and the RNG. `run_program`
//! walks the AST; runtime failures propagate as [`EvalError`] and stop
//! the snippet at the failing statement.

use crate::env::{Environment, MAX_CALL_DEPTH};
use crate::error::{EvalError, EvalResult};
use crate::input::{InputSource, SamplePool};
use crate::modules::{module_value, XorShift};
use crate::value::{compare_values, Value};
use pysim_types::ast::{
    AssignStmt, AugAssignStmt, BinOp, Block, Expr, ExprKind, ForStmt, IfStmt, ImportStmt, Program,
    Stmt, StringPart, UnaryOp, WhileStmt,
};
use std::collections::{BTreeMap, BTreeSet};

/// Hard cap on `while` iterations. Hitting it is a soft failure: a
/// warning line, not an error.
pub const WHILE_CAP: usize = 1000;

/// The line appended when a `while` loop hits the cap.
pub const WHILE_CAP_WARNING: &str = "# warning: while loop stopped after 1000 iterations";

/// A user-defined routine: positional parameters and an unevaluated body.
#[derive(Debug, Clone)]
struct Routine {
    params: Vec<String>,
    body: Block,
}

pub struct Evaluator {
    pub(crate) env: Environment,
    routines: BTreeMap<String, Routine>,
    classes: BTreeSet<String>,
    imports: BTreeSet<String>,
    pub(crate) output: Vec<String>,
    pub(crate) input: Box<dyn InputSource>,
    pub(crate) rng: XorShift,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_input(Box::new(SamplePool::new()))
    }

    pub fn with_input(input: Box<dyn InputSource>) -> Self {
        Self {
            env: Environment::new(),
            routines: BTreeMap::new(),
            classes: BTreeSet::new(),
            imports: BTreeSet::new(),
            output: Vec::new(),
            input,
            rng: XorShift::new(),
        }
    }

    /// Return to the freshly-constructed state. The input source is
    /// rewound, not replaced, so an injected provider survives resets.
    pub fn reset(&mut self) {
        self.env.reset();
        self.routines.clear();
        self.classes.clear();
        self.imports.clear();
        self.output.clear();
        self.input.rewind();
        self.rng.reseed();
    }

    /// The output buffer joined into the final text.
    pub fn output_text(&self) -> String {
        self.output.join("\n")
    }

    /// Whether any line was emitted. A lone `print()` emits an empty
    /// line, which still counts as output.
    pub fn has_output(&self) -> bool {
        !self.output.is_empty()
    }

    pub fn run_program(&mut self, program: &Program) -> EvalResult<()> {
        for stmt in &program.stmts {
            self.eval_stmt(stmt)?;
        }
        Ok(())
    }

    // ── Statements ───────────────────────────────────────────

    fn eval_stmt(&mut self, stmt: &Stmt) -> EvalResult<()> {
        match stmt {
            Stmt::Assign(assign) => self.eval_assign(assign),
            Stmt::AugAssign(aug) => self.eval_aug_assign(aug),
            Stmt::Expr(expr_stmt) => {
                let value = self.eval_expr(&expr_stmt.expr)?;
                // Bare expression lines echo their value, so a line
                // like `sorted([3,1,2])` shows its result.
                if !matches!(value, Value::None) {
                    self.output.push(value.to_display_string());
                }
                Ok(())
            }
            Stmt::If(if_stmt) => self.eval_if(if_stmt),
            Stmt::While(while_stmt) => self.eval_while(while_stmt),
            Stmt::For(for_stmt) => self.eval_for(for_stmt),
            Stmt::FuncDef(def) => {
                self.routines.insert(
                    def.name.name.clone(),
                    Routine {
                        params: def.params.iter().map(|p| p.name.clone()).collect(),
                        body: def.body.clone(),
                    },
                );
                self.env
                    .define(&def.name.name, Value::Routine(def.name.name.clone()));
                Ok(())
            }
            Stmt::ClassDef(class) => {
                // Inert stub: the name is remembered, nothing runs.
                self.classes.insert(class.name.name.clone());
                Ok(())
            }
            Stmt::Import(import) => self.eval_import(import),
            Stmt::Return(ret) => {
                if self.env.call_depth() == 0 {
                    return Err(EvalError::Syntax("'return' outside function".to_string()));
                }
                let value = match &ret.value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::None,
                };
                Err(EvalError::Return(value))
            }
            Stmt::Pass(_) => Ok(()),
            Stmt::Unrecognized { text, .. } => {
                self.output.push(format!("# unprocessed line: {text}"));
                Ok(())
            }
            Stmt::Invalid { message, .. } => Err(EvalError::Syntax(message.clone())),
        }
    }

    fn exec_block(&mut self, block: &Block) -> EvalResult<()> {
        for stmt in &block.stmts {
            self.eval_stmt(stmt)?;
        }
        Ok(())
    }

    fn eval_assign(&mut self, assign: &AssignStmt) -> EvalResult<()> {
        let mut values = Vec::with_capacity(assign.values.len());
        for expr in &assign.values {
            values.push(self.eval_expr(expr)?);
        }

        if assign.targets.len() == 1 {
            let value = if values.len() == 1 {
                match values.pop() {
                    Some(v) => v,
                    None => Value::None,
                }
            } else {
                Value::new_tuple(values)
            };
            self.env.define(&assign.targets[0].name, value);
            return Ok(());
        }

        // Multi-target: unpack a single sequence value, or match the
        // value list one-to-one.
        let values = if values.len() == 1 {
            match values.pop() {
                Some(Value::Tuple(items)) => items.as_ref().clone(),
                Some(Value::List(items)) => items.borrow().clone(),
                Some(single) => vec![single],
                None => Vec::new(),
            }
        } else {
            values
        };

        let expected = assign.targets.len();
        if values.len() > expected {
            return Err(EvalError::Value(format!(
                "too many values to unpack (expected {expected})"
            )));
        }
        if values.len() < expected {
            return Err(EvalError::Value(format!(
                "not enough values to unpack (expected {expected}, got {})",
                values.len()
            )));
        }
        for (target, value) in assign.targets.iter().zip(values) {
            self.env.define(&target.name, value);
        }
        Ok(())
    }

    fn eval_aug_assign(&mut self, aug: &AugAssignStmt) -> EvalResult<()> {
        let current = match self.env.get(&aug.target.name) {
            Some(v) => v.clone(),
            None => return Err(EvalError::UndefinedName(aug.target.name.clone())),
        };
        let rhs = self.eval_expr(&aug.value)?;
        let result = apply_binary(aug.op.bin_op(), current, rhs)?;
        self.env.define(&aug.target.name, result);
        Ok(())
    }

    fn eval_if(&mut self, if_stmt: &IfStmt) -> EvalResult<()> {
        for branch in &if_stmt.branches {
            if self.eval_expr(&branch.condition)?.is_truthy() {
                return self.exec_block(&branch.body);
            }
        }
        if let Some(else_body) = &if_stmt.else_body {
            return self.exec_block(else_body);
        }
        Ok(())
    }

    fn eval_while(&mut self, while_stmt: &WhileStmt) -> EvalResult<()> {
        let mut iterations = 0usize;
        while self.eval_expr(&while_stmt.condition)?.is_truthy() {
            if iterations >= WHILE_CAP {
                self.output.push(WHILE_CAP_WARNING.to_string());
                break;
            }
            self.exec_block(&while_stmt.body)?;
            iterations += 1;
        }
        Ok(())
    }

    fn eval_for(&mut self, for_stmt: &ForStmt) -> EvalResult<()> {
        let iterable = self.eval_expr(&for_stmt.iterable)?;
        // Snapshot: mutating a list inside its own loop does not
        // change the iteration.
        let items: Vec<Value> = match &iterable {
            Value::List(items) => items.borrow().clone(),
            Value::Tuple(items) => items.as_ref().clone(),
            Value::Str(s) => s.chars().map(|c| Value::Str(c.to_string())).collect(),
            _ => Vec::new(),
        };
        for item in items {
            self.env.define(&for_stmt.target.name, item);
            self.exec_block(&for_stmt.body)?;
        }
        Ok(())
    }

    fn eval_import(&mut self, import: &ImportStmt) -> EvalResult<()> {
        let module = &import.module.name;
        self.imports.insert(module.clone());

        if import.names.is_empty() {
            // `import module` — unknown modules are recorded but bind
            // nothing, matching the engine's leniency everywhere else.
            if let Some(value) = module_value(module) {
                self.env.define(module, value);
            }
            return Ok(());
        }

        // `from module import a, b`
        let Some(Value::Dict(entries)) = module_value(module) else {
            return Ok(());
        };
        for name in &import.names {
            let found = entries
                .borrow()
                .iter()
                .find(|(k, _)| k == &name.name)
                .map(|(_, v)| v.clone());
            match found {
                Some(value) => self.env.define(&name.name, value),
                None => {
                    return Err(EvalError::Import(format!(
                        "cannot import name '{}' from '{module}'",
                        name.name
                    )))
                }
            }
        }
        Ok(())
    }

    // ── Expressions ──────────────────────────────────────────

    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match &expr.kind {
            ExprKind::IntLit(n) => Ok(Value::Int(*n)),
            ExprKind::FloatLit(n) => Ok(Value::Float(*n)),
            ExprKind::StringLit(s) => Ok(Value::Str(s.clone())),
            ExprKind::BoolLit(b) => Ok(Value::Bool(*b)),
            ExprKind::NoneLit => Ok(Value::None),
            ExprKind::Identifier(name) => self.resolve_name(name),
            ExprKind::Paren(inner) => self.eval_expr(inner),
            ExprKind::ListLit(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_expr(item)?);
                }
                Ok(Value::new_list(values))
            }
            ExprKind::TupleLit(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_expr(item)?);
                }
                Ok(Value::new_tuple(values))
            }
            ExprKind::DictLit(entries) => {
                let mut out: Vec<(String, Value)> = Vec::with_capacity(entries.len());
                for (key_expr, value_expr) in entries {
                    let key = self.eval_expr(key_expr)?.to_display_string();
                    let value = self.eval_expr(value_expr)?;
                    match out.iter_mut().find(|(k, _)| *k == key) {
                        Some(slot) => slot.1 = value,
                        None => out.push((key, value)),
                    }
                }
                Ok(Value::new_dict(out))
            }
            ExprKind::FString(parts) => {
                let mut text = String::new();
                for part in parts {
                    match part {
                        StringPart::Literal(s) => text.push_str(s),
                        StringPart::Expr(e) => {
                            text.push_str(&self.eval_expr(e)?.to_display_string())
                        }
                    }
                }
                Ok(Value::Str(text))
            }
            ExprKind::Conditional {
                condition,
                then,
                orelse,
            } => {
                if self.eval_expr(condition)?.is_truthy() {
                    self.eval_expr(then)
                } else {
                    self.eval_expr(orelse)
                }
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                    UnaryOp::Neg => match value {
                        Value::Int(n) => Ok(Value::Int(-n)),
                        Value::Float(n) => Ok(Value::Float(-n)),
                        other => Err(EvalError::Type(format!(
                            "bad operand type for unary -: '{}'",
                            other.type_name()
                        ))),
                    },
                }
            }
            ExprKind::Binary { left, op, right } => self.eval_binary(left, *op, right),
            ExprKind::Index { base, index } => {
                let base = self.eval_expr(base)?;
                let index = self.eval_expr(index)?;
                eval_index(&base, &index)
            }
            ExprKind::Attribute { base, name } => {
                let base = self.eval_expr(base)?;
                eval_attribute(&base, &name.name)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args),
        }
    }

    /// Name resolution: environment first, then the builtin registry.
    /// Shadowing a builtin with an assignment therefore works.
    fn resolve_name(&self, name: &str) -> EvalResult<Value> {
        if let Some(value) = self.env.get(name) {
            return Ok(value.clone());
        }
        if let Some(builtin) = crate::builtins::lookup_builtin(name) {
            return Ok(Value::Builtin(builtin));
        }
        Err(EvalError::UndefinedName(name.to_string()))
    }

    fn eval_binary(&mut self, left: &Expr, op: BinOp, right: &Expr) -> EvalResult<Value> {
        // `and`/`or` must not evaluate the right side eagerly.
        match op {
            BinOp::And => {
                let l = self.eval_expr(left)?;
                if !l.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                let r = self.eval_expr(right)?;
                return Ok(Value::Bool(r.is_truthy()));
            }
            BinOp::Or => {
                let l = self.eval_expr(left)?;
                if l.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                let r = self.eval_expr(right)?;
                return Ok(Value::Bool(r.is_truthy()));
            }
            _ => {}
        }
        let l = self.eval_expr(left)?;
        let r = self.eval_expr(right)?;
        apply_binary(op, l, r)
    }

    // ── Calls ────────────────────────────────────────────────

    fn eval_call(&mut self, callee: &Expr, args: &[Expr]) -> EvalResult<Value> {
        // Method and module calls go through the attribute path so the
        // receiver is evaluated once.
        if let ExprKind::Attribute { base, name } = &callee.kind {
            let receiver = self.eval_expr(base)?;
            let args = self.eval_args(args)?;
            return self.call_method(receiver, &name.name, args);
        }
        let callee_value = self.eval_expr(callee)?;
        let args = self.eval_args(args)?;
        self.call_value(callee_value, args)
    }

    fn eval_args(&mut self, args: &[Expr]) -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }
        Ok(values)
    }

    pub(crate) fn call_value(&mut self, callee: Value, args: Vec<Value>) -> EvalResult<Value> {
        match callee {
            Value::Builtin(name) => self.call_builtin(name, args),
            Value::Routine(name) => self.call_routine(&name, args),
            other => Err(EvalError::Type(format!(
                "'{}' object is not callable",
                other.type_name()
            ))),
        }
    }

    /// Call a user routine: fresh frame, positional binding, body,
    /// frame popped even on error. Missing arguments bind `None` and
    /// surplus arguments are dropped.
    fn call_routine(&mut self, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let routine = match self.routines.get(name) {
            Some(r) => r.clone(),
            None => return Err(EvalError::UndefinedName(name.to_string())),
        };
        if self.env.call_depth() >= MAX_CALL_DEPTH {
            return Err(EvalError::RecursionLimit);
        }
        self.env.push_frame();
        let mut args = args.into_iter();
        for param in &routine.params {
            let value = args.next().unwrap_or(Value::None);
            self.env.define(param, value);
        }
        let result = self.exec_block(&routine.body);
        self.env.pop_frame();
        match result {
            Ok(()) => Ok(Value::None),
            Err(EvalError::Return(value)) => Ok(value),
            Err(other) => Err(other),
        }
    }

    fn call_method(&mut self, receiver: Value, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        match &receiver {
            Value::Str(s) => self.call_str_method(s, name, args),
            Value::List(items) => call_list_method(items, name, args),
            Value::Dict(entries) => {
                // Module functions live in dict bindings, so a dotted
                // call looks the key up and dispatches on its value.
                let found = entries
                    .borrow()
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.clone());
                match found {
                    Some(value @ (Value::Builtin(_) | Value::Routine(_))) => {
                        self.call_value(value, args)
                    }
                    Some(other) => Err(EvalError::Type(format!(
                        "'{}' object is not callable",
                        other.type_name()
                    ))),
                    None => Err(EvalError::Attribute(format!(
                        "'dict' object has no attribute '{name}'"
                    ))),
                }
            }
            other => Err(EvalError::Attribute(format!(
                "'{}' object has no attribute '{name}'",
                other.type_name()
            ))),
        }
    }

    fn call_str_method(&mut self, s: &str, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        match name {
            "upper" => Ok(Value::Str(s.to_uppercase())),
            "lower" => Ok(Value::Str(s.to_lowercase())),
            "strip" => Ok(Value::Str(s.trim().to_string())),
            "split" => {
                let parts: Vec<Value> = match args.first() {
                    None => s
                        .split_whitespace()
                        .map(|p| Value::Str(p.to_string()))
                        .collect(),
                    Some(Value::Str(sep)) => {
                        s.split(sep.as_str()).map(|p| Value::Str(p.to_string())).collect()
                    }
                    Some(other) => {
                        return Err(EvalError::Type(format!(
                            "must be str, not {}",
                            other.type_name()
                        )))
                    }
                };
                Ok(Value::new_list(parts))
            }
            _ => Err(EvalError::Attribute(format!(
                "'str' object has no attribute '{name}'"
            ))),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Value-level operations ───────────────────────────────────

fn call_list_method(
    items: &std::rc::Rc<std::cell::RefCell<Vec<Value>>>,
    name: &str,
    mut args: Vec<Value>,
) -> EvalResult<Value> {
    match name {
        "append" => {
            if args.len() != 1 {
                return Err(EvalError::Type(format!(
                    "append() takes exactly one argument ({} given)",
                    args.len()
                )));
            }
            items.borrow_mut().push(args.remove(0));
            Ok(Value::None)
        }
        "reverse" => {
            items.borrow_mut().reverse();
            Ok(Value::None)
        }
        "sort" => {
            let mut sorted = items.borrow().clone();
            crate::builtins::sort_values(&mut sorted);
            *items.borrow_mut() = sorted;
            Ok(Value::None)
        }
        _ => Err(EvalError::Attribute(format!(
            "'list' object has no attribute '{name}'"
        ))),
    }
}

/// Arithmetic, comparison, and membership on evaluated operands.
pub(crate) fn apply_binary(op: BinOp, l: Value, r: Value) -> EvalResult<Value> {
    match op {
        BinOp::Add => eval_add(l, r),
        BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::FloorDiv | BinOp::Mod | BinOp::Pow => {
            eval_arith(op, l, r)
        }
        BinOp::Eq => Ok(Value::Bool(l == r)),
        BinOp::NotEq => Ok(Value::Bool(l != r)),
        BinOp::Less | BinOp::Greater | BinOp::LessEq | BinOp::GreaterEq => {
            let Some(ordering) = compare_values(&l, &r) else {
                return Err(EvalError::Type(format!(
                    "'{}' not supported between instances of '{}' and '{}'",
                    op.symbol(),
                    l.type_name(),
                    r.type_name()
                )));
            };
            let result = match op {
                BinOp::Less => ordering.is_lt(),
                BinOp::Greater => ordering.is_gt(),
                BinOp::LessEq => ordering.is_le(),
                _ => ordering.is_ge(),
            };
            Ok(Value::Bool(result))
        }
        BinOp::In => Ok(Value::Bool(eval_membership(&l, &r)?)),
        BinOp::NotIn => Ok(Value::Bool(!eval_membership(&l, &r)?)),
        // Short-circuit forms are handled before operand evaluation.
        BinOp::And => Ok(Value::Bool(l.is_truthy() && r.is_truthy())),
        BinOp::Or => Ok(Value::Bool(l.is_truthy() || r.is_truthy())),
    }
}

fn eval_add(l: Value, r: Value) -> EvalResult<Value> {
    match (&l, &r) {
        (Value::Int(a), Value::Int(b)) => Ok(match a.checked_add(*b) {
            Some(n) => Value::Int(n),
            None => Value::Float(*a as f64 + *b as f64),
        }),
        _ if l.is_number() && r.is_number() => {
            // as_number is Some for both by the guard
            let a = l.as_number().unwrap_or(0.0);
            let b = r.as_number().unwrap_or(0.0);
            Ok(Value::Float(a + b))
        }
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
        // Lenient concatenation: a string plus anything stringifies
        // the other side, the way the exercises expect.
        (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::Str(format!(
            "{}{}",
            l.to_display_string(),
            r.to_display_string()
        ))),
        (Value::List(a), Value::List(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::new_list(items))
        }
        _ => Err(type_error_for(BinOp::Add, &l, &r)),
    }
}

fn eval_arith(op: BinOp, l: Value, r: Value) -> EvalResult<Value> {
    if let (Value::Int(a), Value::Int(b)) = (&l, &r) {
        return eval_int_arith(op, *a, *b);
    }
    let (Some(a), Some(b)) = (l.as_number(), r.as_number()) else {
        return Err(type_error_for(op, &l, &r));
    };
    match op {
        BinOp::Sub => Ok(Value::Float(a - b)),
        BinOp::Mul => Ok(Value::Float(a * b)),
        BinOp::Div => {
            if b == 0.0 {
                return Err(EvalError::ZeroDivision("float division by zero".to_string()));
            }
            Ok(Value::Float(a / b))
        }
        BinOp::FloorDiv => {
            if b == 0.0 {
                return Err(EvalError::ZeroDivision("float floor division by zero".to_string()));
            }
            Ok(Value::Float((a / b).floor()))
        }
        BinOp::Mod => {
            if b == 0.0 {
                return Err(EvalError::ZeroDivision("float modulo".to_string()));
            }
            // Remainder takes the divisor's sign, as in Python.
            let m = a % b;
            let m = if m != 0.0 && (m < 0.0) != (b < 0.0) {
                m + b
            } else {
                m
            };
            Ok(Value::Float(m))
        }
        BinOp::Pow => Ok(Value::Float(a.powf(b))),
        _ => Err(type_error_for(op, &l, &r)),
    }
}

fn eval_int_arith(op: BinOp, a: i64, b: i64) -> EvalResult<Value> {
    match op {
        BinOp::Sub => Ok(match a.checked_sub(b) {
            Some(n) => Value::Int(n),
            None => Value::Float(a as f64 - b as f64),
        }),
        BinOp::Mul => Ok(match a.checked_mul(b) {
            Some(n) => Value::Int(n),
            None => Value::Float(a as f64 * b as f64),
        }),
        BinOp::Div => {
            if b == 0 {
                return Err(EvalError::ZeroDivision("division by zero".to_string()));
            }
            // Exact integer division stays an int; otherwise float.
            if a % b == 0 {
                Ok(Value::Int(a / b))
            } else {
                Ok(Value::Float(a as f64 / b as f64))
            }
        }
        BinOp::FloorDiv => {
            if b == 0 {
                return Err(EvalError::ZeroDivision(
                    "integer division or modulo by zero".to_string(),
                ));
            }
            let q = a / b;
            // Floor, not truncate: adjust when signs differ.
            let q = if a % b != 0 && (a < 0) != (b < 0) {
                q - 1
            } else {
                q
            };
            Ok(Value::Int(q))
        }
        BinOp::Mod => {
            if b == 0 {
                return Err(EvalError::ZeroDivision(
                    "integer division or modulo by zero".to_string(),
                ));
            }
            let m = a % b;
            let m = if m != 0 && (m < 0) != (b < 0) { m + b } else { m };
            Ok(Value::Int(m))
        }
        BinOp::Pow => {
            if b >= 0 {
                match u32::try_from(b).ok().and_then(|e| a.checked_pow(e)) {
                    Some(n) => Ok(Value::Int(n)),
                    None => Ok(Value::Float((a as f64).powf(b as f64))),
                }
            } else {
                Ok(Value::Float((a as f64).powf(b as f64)))
            }
        }
        _ => Err(EvalError::Type(format!(
            "unsupported operand type(s) for {}: 'int' and 'int'",
            op.symbol()
        ))),
    }
}

fn type_error_for(op: BinOp, l: &Value, r: &Value) -> EvalError {
    EvalError::Type(format!(
        "unsupported operand type(s) for {}: '{}' and '{}'",
        op.symbol(),
        l.type_name(),
        r.type_name()
    ))
}

fn eval_membership(needle: &Value, haystack: &Value) -> EvalResult<bool> {
    match haystack {
        Value::Str(s) => match needle {
            Value::Str(sub) => Ok(s.contains(sub.as_str())),
            other => Err(EvalError::Type(format!(
                "'in <string>' requires string as left operand, not {}",
                other.type_name()
            ))),
        },
        Value::List(items) => Ok(items.borrow().iter().any(|v| v == needle)),
        Value::Tuple(items) => Ok(items.iter().any(|v| v == needle)),
        Value::Dict(entries) => {
            let key = needle.to_display_string();
            Ok(entries.borrow().iter().any(|(k, _)| *k == key))
        }
        other => Err(EvalError::Type(format!(
            "argument of type '{}' is not iterable",
            other.type_name()
        ))),
    }
}

fn eval_index(base: &Value, index: &Value) -> EvalResult<Value> {
    match base {
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let idx = sequence_index(index, chars.len(), "string")?;
            Ok(Value::Str(chars[idx].to_string()))
        }
        Value::List(items) => {
            let items = items.borrow();
            let idx = sequence_index(index, items.len(), "list")?;
            Ok(items[idx].clone())
        }
        Value::Tuple(items) => {
            let idx = sequence_index(index, items.len(), "tuple")?;
            Ok(items[idx].clone())
        }
        Value::Dict(entries) => {
            let key = index.to_display_string();
            entries
                .borrow()
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .ok_or(EvalError::Key(key))
        }
        other => Err(EvalError::Type(format!(
            "'{}' object is not subscriptable",
            other.type_name()
        ))),
    }
}

/// Resolve a sequence index with negative wrap-around.
fn sequence_index(index: &Value, len: usize, what: &str) -> EvalResult<usize> {
    let Value::Int(i) = index else {
        return Err(EvalError::Type(format!(
            "{what} indices must be integers, not {}",
            index.type_name()
        )));
    };
    let i = *i;
    let adjusted = if i < 0 { i + len as i64 } else { i };
    if adjusted < 0 || adjusted >= len as i64 {
        return Err(EvalError::Index(format!("{what} index out of range")));
    }
    Ok(adjusted as usize)
}

fn eval_attribute(base: &Value, name: &str) -> EvalResult<Value> {
    match base {
        // Module constants: `math.pi` is a dict key lookup.
        Value::Dict(entries) => entries
            .borrow()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| {
                EvalError::Attribute(format!("'dict' object has no attribute '{name}'"))
            }),
        other => Err(EvalError::Attribute(format!(
            "'{}' object has no attribute '{name}'",
            other.type_name()
        ))),
    }
}
