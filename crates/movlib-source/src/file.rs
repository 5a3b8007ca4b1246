use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use miette::{MietteError, SourceCode, SourceSpan, SpanContents};

use crate::SourceError;

/// A source buffer handed to the compiler.
///
/// The handle is cheap to clone: every clone shares the same immutable bytes,
/// so spans can point back into it without owning a copy.
///
/// # Fields
///
/// * `name` - Display name of the buffer. Sources created in tests or from
///   standard input have no name.
/// * `bytes` - The buffer exactly as read. It need not be valid UTF-8, so
///   byte offsets in spans always match the file on disk.
///
/// # Example
///
/// ```rust
/// use movlib_source::SourceFile;
///
/// let file = SourceFile::named("main.mov", "r1 = r2\n");
/// assert_eq!(file.name(), Some("main.mov"));
/// assert_eq!(file.contents(), "r1 = r2\n");
/// ```
#[derive(Clone)]
pub struct SourceFile {
    inner: Arc<SourceFileInner>,
}

struct SourceFileInner {
    name: Option<String>,
    bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: Option<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: Arc::new(SourceFileInner {
                name,
                bytes: contents.into(),
            }),
        }
    }

    /// A source buffer with a display name
    pub fn named(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self::new(Some(name.into()), contents)
    }

    /// A source buffer without a name
    pub fn anonymous(contents: impl Into<Vec<u8>>) -> Self {
        Self::new(None, contents)
    }

    /// Loads a source buffer from disk.
    ///
    /// The bytes are kept as they are. Invalid UTF-8 inside a comment is
    /// skipped like any other text; outside a comment the tokenizer reports
    /// each offending byte as non-ASCII input.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let bytes = std::fs::read(path).map_err(|e| SourceError::from_io(path.to_path_buf(), e))?;
        log::debug!("Loaded source {} ({} bytes)", path.display(), bytes.len());
        Ok(Self::named(path.display().to_string(), bytes))
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// The name used when rendering this buffer in messages
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("<anonymous>")
    }

    pub fn bytes(&self) -> &[u8] {
        &self.inner.bytes
    }

    /// The buffer as text, with invalid UTF-8 replaced by U+FFFD
    pub fn contents(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.inner.bytes)
    }

    /// Returns true if both handles refer to the same buffer
    pub fn same_file(&self, other: &SourceFile) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        self.same_file(other)
    }
}

impl Eq for SourceFile {}

/// Lets miette render snippets straight from the shared buffer
impl SourceCode for SourceFile {
    fn read_span<'a>(
        &'a self,
        span: &SourceSpan,
        context_lines_before: usize,
        context_lines_after: usize,
    ) -> Result<Box<dyn SpanContents<'a> + 'a>, MietteError> {
        <[u8] as SourceCode>::read_span(
            self.bytes(),
            span,
            context_lines_before,
            context_lines_after,
        )
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.inner.name)
            .field("len", &self.inner.bytes.len())
            .finish()
    }
}
