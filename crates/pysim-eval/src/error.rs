//! Runtime error types for the PySim evaluator.
//!
//! Error display strings follow Python's exception phrasing
//! (`NameError: name 'x' is not defined`) because they are shown
//! verbatim to learners in the exercise UI.

use crate::value::Value;
use thiserror::Error;

/// A runtime failure. The first one raised aborts the rest of the
/// snippet; accumulated output is preserved alongside the message.
#[derive(Debug, Clone, Error)]
pub enum EvalError {
    /// Reference to a name absent from every reachable scope.
    #[error("NameError: name '{0}' is not defined")]
    UndefinedName(String),
    /// Operand or argument of the wrong type.
    #[error("TypeError: {0}")]
    Type(String),
    /// Right value, wrong content (unparseable int, unpack arity, ...).
    #[error("ValueError: {0}")]
    Value(String),
    /// Division or modulo by zero.
    #[error("ZeroDivisionError: {0}")]
    ZeroDivision(String),
    /// Sequence index out of range.
    #[error("IndexError: {0}")]
    Index(String),
    /// Missing dictionary key.
    #[error("KeyError: '{0}'")]
    Key(String),
    /// Attribute or method missing on the receiver.
    #[error("AttributeError: {0}")]
    Attribute(String),
    /// `from module import name` where the module lacks the name.
    #[error("ImportError: {0}")]
    Import(String),
    /// A line that committed to a statement form but failed to parse,
    /// reached at run time.
    #[error("SyntaxError: {0}")]
    Syntax(String),
    /// Call-frame stack exceeded its depth limit.
    #[error("RecursionError: maximum recursion depth exceeded")]
    RecursionLimit,
    /// `return` statement (used internally for control flow; caught at
    /// the routine call boundary and never surfaced to callers).
    #[error("return")]
    Return(Value),
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
