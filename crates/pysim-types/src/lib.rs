//! Shared types for the PySim interpreter.
//!
//! This crate defines the AST node types, source spans, and the source-text
//! wrapper used across the lexer, parser, and evaluator.

mod span;
pub mod ast;

pub use span::{SourceText, Span};
