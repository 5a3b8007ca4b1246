use std::ops::Range;

use logos::Logos;
use movlib_source::{char_len, CompilerMessage, Diagnostics, Position, SourceFile, Span};

use crate::token::{Token, TokenKind};

/// Raw lexemes recognised by the scanner. Whitespace and comments are
/// skipped here and never reach the token stream.
///
/// The patterns are byte strings, so the scanner runs over `[u8]` and a
/// comment body may hold any byte at all.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[token(b"=")]
    Move,

    #[token(b"?")]
    ConditionalMove,

    #[token(b":")]
    LabelColon,

    #[regex(br"[a-zA-Z][a-zA-Z0-9_]*")]
    Identifier,

    #[regex(br"[ \t\r\n]+", logos::skip)]
    Whitespace,

    // Runs up to the newline, or to the end of input when there is none.
    #[regex(br"#[^\n]*", logos::skip)]
    Comment,

    #[error]
    Error,
}

/// Splits a source buffer into tokens.
///
/// The lexer keeps a cursor that only moves forward, so computing the
/// line/column of each token costs a single pass over the buffer.
pub struct Lexer<'src> {
    file: &'src SourceFile,
    inner: logos::Lexer<'src, Lexeme>,
    cursor: Position,
}

impl<'src> Lexer<'src> {
    pub fn new(file: &'src SourceFile) -> Self {
        Self {
            file,
            inner: Lexeme::lexer(file.bytes()),
            cursor: Position::start(),
        }
    }

    /// Returns the next token, reporting anything unrecognised along the way.
    pub fn next_token(&mut self, diagnostics: &mut Diagnostics) -> Option<Token> {
        loop {
            let lexeme = self.inner.next()?;
            let range = self.inner.span();

            let kind = match lexeme {
                Lexeme::Move => TokenKind::Move,
                Lexeme::ConditionalMove => TokenKind::ConditionalMove,
                Lexeme::LabelColon => TokenKind::LabelColon,
                Lexeme::Identifier => {
                    let token = Token::identifier(self.span(range));
                    log::trace!("lexed {} at {}", token, token.span);
                    return Some(token);
                }
                Lexeme::Whitespace | Lexeme::Comment => continue,
                Lexeme::Error => {
                    self.report_unrecognized(range, diagnostics);
                    continue;
                }
            };

            let token = Token::new(kind, self.span(range));
            log::trace!("lexed {} at {}", token, token.span);
            return Some(token);
        }
    }

    /// Consumes the lexer, returning every token in source order
    pub fn tokenize(mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token(diagnostics) {
            tokens.push(token);
        }
        log::debug!(
            "tokenized {}: {} tokens, {} messages",
            self.file.display_name(),
            tokens.len(),
            diagnostics.len()
        );
        tokens
    }

    fn position_at(&mut self, offset: usize) -> Position {
        let source = self.file.bytes();
        self.cursor = self.cursor.advance_over_bytes(&source[self.cursor.offset..offset]);
        self.cursor
    }

    fn span(&mut self, range: Range<usize>) -> Span {
        let start = self.position_at(range.start);
        let end = self.position_at(range.end);
        Span::new(self.file.clone(), start, end)
    }

    /// One error per character, each spanning just that character.
    ///
    /// The scanner rejects input a byte at a time; a valid multi-byte
    /// character is pulled into the error so it is reported once.
    fn report_unrecognized(&mut self, range: Range<usize>, diagnostics: &mut Diagnostics) {
        let source = self.file.bytes();
        let mut start = range.start;
        let mut end = range.end;
        while start < end {
            let len = char_len(&source[start..]);
            if start + len > end {
                self.inner.bump(start + len - end);
                end = start + len;
            }

            let first = source[start];
            let message = if first.is_ascii() {
                format!("unrecognized character {:?}", char::from(first))
            } else {
                "only ASCII supported outside comments".to_string()
            };
            let span = self.span(start..start + len);
            diagnostics.report(CompilerMessage::error(message, span));
            start += len;
        }
    }
}

/// Tokenizes `file`, appending any problems to `diagnostics`
pub fn tokenize(file: &SourceFile, diagnostics: &mut Diagnostics) -> Vec<Token> {
    Lexer::new(file).tokenize(diagnostics)
}

/// Helper function to lex an anonymous source string
pub fn lex(source: &str) -> (Vec<Token>, Diagnostics) {
    let file = SourceFile::anonymous(source);
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(&file, &mut diagnostics);
    (tokens, diagnostics)
}
