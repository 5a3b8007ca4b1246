//! Source handling for the MovLib compiler.
//!
//! This crate is responsible for:
//! - Holding source buffers behind a cheap, shareable handle
//! - Tracking exact source locations (line, column and byte offset)
//! - Collecting compiler messages produced while a source is processed
//!
//! ## Diagnostics
//!
//! Messages are appended to a [`Diagnostics`] log owned by the compilation
//! session. Every [`CompilerMessage`] implements miette's `Diagnostic`, so the
//! log can be rendered with source context, highlighting and labels.

mod diagnostic;
mod error;
mod file;
mod span;

pub use diagnostic::{CompilerMessage, Diagnostics, Severity};
pub use error::SourceError;
pub use file::SourceFile;
pub use span::{char_len, Position, Span};
