//! Error types for Boxwood operations.
//!
//! This module provides the main error type [`BoxwoodError`] which wraps
//! various error conditions that can occur while laying out and rendering a
//! diagram. A failed call never returns a partial layout or image.

use std::io;

use thiserror::Error;

use boxwood_core::{draw::TextError, semantic::ModelError};

/// The main error type for Boxwood operations.
#[derive(Debug, Error)]
pub enum BoxwoodError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The forest has no roots. Raised before any layout work starts.
    #[error("Nothing to render: the diagram has no nodes")]
    NothingToRender,

    #[error("Text error: {0}")]
    Text(#[from] TextError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for BoxwoodError {
    fn from(error: crate::export::Error) -> Self {
        match error {
            crate::export::Error::Text(err) => Self::Text(err),
            other => Self::Export(Box::new(other)),
        }
    }
}
