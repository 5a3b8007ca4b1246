use miette::Diagnostic;
use movlib_source::SourceError;
use movlib_vm::ConfigError;
use thiserror::Error;

/// CLI-specific error type that provides rich diagnostics
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("{file}: {errors} error(s) reported")]
    #[diagnostic(code(movlib::cli::compilation_failed))]
    CompilationFailed { file: String, errors: usize },
}
