use std::path::PathBuf;
use thiserror::Error;
use miette::Diagnostic;

/// Errors that can occur when loading a source buffer
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The source file does not exist
    #[error("Source file does not exist: {0}")]
    #[diagnostic(
        code("SOURCE-001"),
        help("Make sure the path exists and has proper permissions")
    )]
    NotFound(PathBuf),

    /// The source file exists but could not be read
    #[error("Error reading source file {path}: {message}")]
    #[diagnostic(
        code("SOURCE-002"),
        help("Check file permissions and ensure the path refers to a regular file")
    )]
    ReadError {
        path: PathBuf,
        message: String,
    },
}

impl SourceError {
    pub(crate) fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound(path),
            _ => SourceError::ReadError {
                path,
                message: err.to_string(),
            },
        }
    }
}
