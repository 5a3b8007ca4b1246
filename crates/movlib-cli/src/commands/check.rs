use std::path::Path;

use movlib_source::{Diagnostics, Severity};
use movlib_syntax::tokenize;

use crate::error::CliError;
use crate::io::{read_source, render_diagnostics};

/// Tokenizes a source file and fails if any error was reported
pub fn handle_check(path: &Path) -> Result<(), CliError> {
    log::debug!("Checking {}", path.display());
    let file = read_source(path)?;
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(&file, &mut diagnostics);

    render_diagnostics(&file, &diagnostics);

    if diagnostics.has_errors() {
        let errors = diagnostics.of_severity(Severity::Error).count();
        log::debug!("{}: {} errors", file.display_name(), errors);
        return Err(CliError::CompilationFailed {
            file: file.display_name().to_string(),
            errors,
        });
    }

    println!("{}: ok ({} tokens)", file.display_name(), tokens.len());
    Ok(())
}
