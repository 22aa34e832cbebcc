//! Tree-walking evaluator for the restricted Python subset.
//!
//! The entry point is [`Interpreter`], which owns the whole pipeline:
//! lex, parse, evaluate, and collect `{output, error}` for the hosting
//! exercise page. Everything below it — [`Value`], [`Environment`],
//! the built-in library, the `math`/`random` pseudo-modules, and the
//! simulated-input provider — is instance-owned state with no globals,
//! so independent interpreters never observe each other.

pub mod builtins;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod input;
pub mod interpreter;
pub mod modules;
pub mod value;

pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use input::{InputSource, SamplePool};
pub use interpreter::{ExecOutcome, Interpreter};
pub use value::Value;
