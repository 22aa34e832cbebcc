//! PySim lexer: converts Python-subset source text into a token stream.
//!
//! The stream is indentation-aware — block structure is delivered as
//! `Indent`/`Dedent` tokens so the parser never needs to look at columns.

pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind, ALL_KEYWORDS};
