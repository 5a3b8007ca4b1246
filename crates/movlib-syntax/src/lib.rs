//! Tokenizer for the MovLib assembly language.
//!
//! MovLib has a single instruction family: `dst = src` moves a value,
//! `dst = src ? cond` moves it only when `cond` is non-zero, and `name:`
//! declares a label. The tokenizer turns a source buffer into that handful of
//! token kinds, each carrying the exact span it was read from. Malformed input
//! never aborts a pass; it is reported to the diagnostics log and skipped.

pub mod lexer;
pub mod token;

pub use lexer::{lex, tokenize, Lexer};
pub use token::{Token, TokenKind};
