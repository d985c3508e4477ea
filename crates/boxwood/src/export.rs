//! Export backends for Boxwood scenes.
//!
//! This module provides the [`Exporter`] trait that turns an assembled
//! [`Scene`] into an output format. It is the last stage of the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Diagram (forest + edges)
//!     ↓ layout
//! Layout (positioned boxes, canvas)
//!     ↓ render
//! Scene (layered primitives)
//!     ↓ export (this module)
//! RGBA image / SVG document
//! ```
//!
//! # Available Backends
//!
//! - [`raster`]: RGBA pixels via `tiny-skia`
//! - [`svg`]: SVG document text
//! - [`plantuml`]: PlantUML class-diagram text, straight from the
//!   [`Diagram`](boxwood_core::semantic::Diagram) without a scene
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. It converts into
//! [`BoxwoodError`](crate::BoxwoodError) at the crate boundary.

pub mod plantuml;
pub mod raster;
pub mod svg;

use boxwood_core::draw::TextError;

use crate::render::Scene;

/// Abstraction for scene export backends.
pub trait Exporter {
    /// What the backend produces.
    type Output;

    /// Exports a scene to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be converted to the
    /// target format, or [`Error::Text`] if a label cannot be rasterized.
    fn export_scene(&mut self, scene: &Scene) -> Result<Self::Output, Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// Text could not be shaped or rasterized.
    Text(TextError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Text(err) => write!(f, "Text error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Text(err) => Some(err),
        }
    }
}

impl From<TextError> for Error {
    fn from(err: TextError) -> Self {
        Self::Text(err)
    }
}

