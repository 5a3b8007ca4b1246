use std::path::Path;

use miette::{NamedSource, Report};
use movlib_source::{Diagnostics, SourceFile};

use crate::error::CliError;

pub fn read_source(path: &Path) -> Result<SourceFile, CliError> {
    Ok(SourceFile::load(path)?)
}

/// Prints every message in `diagnostics` to stderr with source context.
///
/// Each report holds a clone of the `SourceFile` handle, so the buffer is
/// shared rather than copied per message.
pub fn render_diagnostics(file: &SourceFile, diagnostics: &Diagnostics) {
    for message in diagnostics.messages() {
        let source = NamedSource::new(file.display_name(), file.clone());
        eprintln!("{:?}", Report::new(message.clone()).with_source_code(source));
    }
}
