//! Diagnostic and error reporting utilities

use std::ops::Range;

use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

use crate::{CliError, Result};

/// Set up enhanced error reporting with miette
pub fn setup_error_reporting() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .map_err(|e| CliError::Config(format!("Failed to setup error reporting: {}", e)))?;

    Ok(())
}

/// A manifest that could not be decoded, with the offending location when the
/// decoder reports one.
#[derive(Error, Debug, Diagnostic)]
#[error("Invalid manifest {path}: {message}")]
#[diagnostic(
    code(springboard::manifest),
    help("Manifests hold an `activities` list; each activity needs a `name` and `urls`")
)]
pub struct ManifestError {
    pub path: String,
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: Option<SourceSpan>,
}

impl ManifestError {
    pub fn new(path: impl Into<String>, content: String, message: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            src: NamedSource::new(path.clone(), content),
            path,
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = Some(span.into());
        self
    }
}

/// Byte offset of a 1-based `line`/`column` position, clamped to the content.
pub fn line_column_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(content.len())
}

/// Print errors that carry source context through miette's graphical handler.
/// Returns `false` when the error has no richer rendering than its message.
pub fn render_cli_error(error: &CliError) -> bool {
    let CliError::Manifest(diagnostic) = error else {
        return false;
    };
    let mut rendered = String::new();
    match GraphicalReportHandler::new().render_report(&mut rendered, diagnostic.as_ref()) {
        Ok(()) => {
            eprintln!("{rendered}");
            true
        }
        Err(_) => false,
    }
}
