use std::borrow::Cow;
use std::fmt;

use miette::SourceSpan;

use crate::SourceFile;

/// A point in a source buffer.
///
/// `line` and `column` are 1-based and count characters; `offset` is the
/// 0-based byte offset into the buffer. A byte that is not part of a valid
/// UTF-8 sequence counts as one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// The position of the first character of a buffer
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }

    /// The position just after `ch`
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self::new(self.line + 1, 1, self.offset + 1)
        } else {
            Self::new(self.line, self.column + 1, self.offset + ch.len_utf8())
        }
    }

    /// The position just after `text`
    pub fn advance_over(self, text: &str) -> Self {
        text.chars().fold(self, Position::advance)
    }

    /// The position just after `bytes`, which need not be valid UTF-8
    pub fn advance_over_bytes(self, mut bytes: &[u8]) -> Self {
        let mut pos = self;
        while let Some(&first) = bytes.first() {
            let len = char_len(bytes);
            pos = if first == b'\n' {
                Self::new(pos.line + 1, 1, pos.offset + 1)
            } else {
                Self::new(pos.line, pos.column + 1, pos.offset + len)
            };
            bytes = &bytes[len..];
        }
        pos
    }
}

/// Byte length of the character at the start of `bytes`.
///
/// A byte that does not begin a complete UTF-8 sequence is a character of
/// length 1. Returns 0 for empty input.
pub fn char_len(bytes: &[u8]) -> usize {
    let head = &bytes[..bytes.len().min(4)];
    let valid = match std::str::from_utf8(head) {
        Ok(text) => text,
        Err(e) => std::str::from_utf8(&head[..e.valid_up_to()]).unwrap_or_default(),
    };
    match valid.chars().next() {
        Some(ch) => ch.len_utf8(),
        None => head.len().min(1),
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range `[start, end)` over one source buffer.
///
/// Spans only exist for diagnostics; nothing at execution time looks at them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    file: SourceFile,
    start: Position,
    end: Position,
}

impl Span {
    pub fn new(file: SourceFile, start: Position, end: Position) -> Self {
        debug_assert!(end.offset >= start.offset, "span ends before it starts");
        Self { file, start, end }
    }

    /// An empty span at `pos`
    pub fn point(file: SourceFile, pos: Position) -> Self {
        Self::new(file, pos, pos)
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// The source text covered by this span
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.file.bytes()[self.start.offset..self.end.offset])
    }

    /// Smallest span covering both spans. Both must come from the same buffer.
    pub fn merge(&self, other: &Span) -> Span {
        debug_assert!(self.file.same_file(&other.file), "merging spans of different files");
        Span {
            file: self.file.clone(),
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Byte range in the form miette expects
    pub fn source_span(&self) -> SourceSpan {
        SourceSpan::new(self.start.offset.into(), self.len())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display_name(), self.start)
    }
}
