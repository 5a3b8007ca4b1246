//! Compiler messages and the diagnostics log.
//!
//! Every pass that looks at source text reports problems by appending a
//! [`CompilerMessage`] to the session's [`Diagnostics`]. Messages are never
//! mutated or removed; later stages ask the log whether anything of a given
//! severity was reported before they run.
//!
//! ## Miette Integration
//!
//! `CompilerMessage` implements miette's `Diagnostic`, so a message can be
//! wrapped in a `miette::Report` and rendered with the offending source line
//! highlighted.

use std::fmt;

use miette::{Diagnostic, LabeledSpan};
use thiserror::Error;

use crate::Span;

/// How serious a compiler message is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}", s)
    }
}

impl From<Severity> for miette::Severity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Info => miette::Severity::Advice,
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        }
    }
}

/// A single message produced during compilation.
///
/// # Fields
///
/// * `severity` - Whether this is informational, a warning or an error
/// * `message` - Human readable text
/// * `span` - The source range the message refers to
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CompilerMessage {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl CompilerMessage {
    pub fn new(severity: Severity, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity,
            message: message.into(),
            span,
        }
    }

    pub fn info(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Info, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, message, span)
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, message, span)
    }
}

impl Diagnostic for CompilerMessage {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("movlib::{}", self.severity)))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity.into())
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some(self.message.clone()), self.span.source_span());
        Some(Box::new(std::iter::once(label)))
    }

    /// The text of the buffer the span points into
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(self.span.file())
    }
}

/// Ordered log of compiler messages for one compilation session.
///
/// The log is a single-writer structure: passes take it by `&mut` while they
/// run and hand it back when they finish.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<CompilerMessage>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the log
    pub fn report(&mut self, message: CompilerMessage) {
        match message.severity {
            Severity::Error => log::warn!("{}: error: {}", message.span, message.message),
            Severity::Warning => log::warn!("{}: warning: {}", message.span, message.message),
            Severity::Info => log::debug!("{}: {}", message.span, message.message),
        }
        self.messages.push(message);
    }

    /// Returns true if any message of exactly `severity` was reported
    pub fn has_messages(&self, severity: Severity) -> bool {
        self.messages.iter().any(|m| m.severity == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.has_messages(Severity::Error)
    }

    /// All messages in the order they were reported
    pub fn messages(&self) -> &[CompilerMessage] {
        &self.messages
    }

    pub fn of_severity(&self, severity: Severity) -> impl Iterator<Item = &CompilerMessage> + '_ {
        self.messages.iter().filter(move |m| m.severity == severity)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl IntoIterator for Diagnostics {
    type Item = CompilerMessage;
    type IntoIter = std::vec::IntoIter<CompilerMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}
