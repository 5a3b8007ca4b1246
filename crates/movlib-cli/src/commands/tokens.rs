use std::path::Path;

use movlib_source::Diagnostics;
use movlib_syntax::tokenize;

use crate::error::CliError;
use crate::io::{read_source, render_diagnostics};

/// Prints the token stream of a source file, one token per line
pub fn handle_tokens(path: &Path) -> Result<(), CliError> {
    log::debug!("Tokenizing {}", path.display());
    let file = read_source(path)?;
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(&file, &mut diagnostics);
    log::debug!(
        "{}: {} tokens, {} messages",
        file.display_name(),
        tokens.len(),
        diagnostics.len()
    );

    for token in &tokens {
        let span = &token.span;
        println!(
            "{}..{}\t{:?}\t{}",
            span.start(),
            span.end(),
            token.kind,
            token.name().unwrap_or("")
        );
    }

    render_diagnostics(&file, &diagnostics);
    Ok(())
}
