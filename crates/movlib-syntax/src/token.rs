use std::fmt;

use movlib_source::Span;

/// The kinds of token the language knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `=`, the one instruction
    Move,
    /// `?`, turns a move into a conditional move
    ConditionalMove,
    /// A register, pin, table, label or macro name. Which one is decided later.
    Identifier,
    /// `:` after a label name
    LabelColon,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Move => "=",
            TokenKind::ConditionalMove => "?",
            TokenKind::Identifier => "identifier",
            TokenKind::LabelColon => ":",
        };
        write!(f, "{}", s)
    }
}

/// A token together with the span it was lexed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Name of an identifier token; `None` for punctuation
    pub text: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span, text: None }
    }

    pub fn identifier(span: Span) -> Self {
        let text = span.text().into_owned();
        Self {
            kind: TokenKind::Identifier,
            span,
            text: Some(text),
        }
    }

    /// The identifier's name, if this is an identifier
    pub fn name(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{}({})", self.kind, text),
            None => write!(f, "{}", self.kind),
        }
    }
}
