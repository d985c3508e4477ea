//! Error adapter for converting BoxwoodError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use boxwood::BoxwoodError;

/// Adapter giving a [`BoxwoodError`] a diagnostic code and help text.
pub struct ErrorAdapter(pub BoxwoodError);

impl fmt::Debug for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            BoxwoodError::Io(_) => "boxwood::io",
            BoxwoodError::NothingToRender => "boxwood::nothing_to_render",
            BoxwoodError::Text(_) => "boxwood::text",
            BoxwoodError::Model(_) => "boxwood::model",
            BoxwoodError::Config(_) => "boxwood::config",
            BoxwoodError::Input(_) => "boxwood::input",
            BoxwoodError::Export(_) => "boxwood::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            BoxwoodError::NothingToRender => "add at least one [[roots]] table to the input document",
            BoxwoodError::Text(_) => "titles and body lines must be single lines of text",
            BoxwoodError::Config(_) => "check the [layout] and [style] tables of the configuration file",
            BoxwoodError::Input(_) => {
                "edges need `source`, `target` and a `kind` of contained-reference, association or generalization"
            }
            BoxwoodError::Io(_) | BoxwoodError::Model(_) | BoxwoodError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
