//! Parser for the restricted Python subset.
//!
//! Builds a [`pysim_types::ast::Program`] from lexer tokens. Parsing is
//! total: lines that start no known statement form become
//! [`pysim_types::ast::Stmt::Unrecognized`] nodes and lines that commit
//! to a form but fail mid-parse become
//! [`pysim_types::ast::Stmt::Invalid`] nodes. Both are resolved at run
//! time, so one broken line never prevents the rest of a snippet from
//! running.

pub mod parser;

mod parse_expr;
mod parse_stmt;

pub use parser::{parse, Parser};
