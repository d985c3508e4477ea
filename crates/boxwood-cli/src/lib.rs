//! CLI logic for the Boxwood diagram renderer.
//!
//! Reads a diagram document, renders it and writes the PNG plus the
//! secondary PlantUML and SVG outputs.

pub mod document;
pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::fs;

use log::info;

use boxwood::{BoxwoodError, DiagramRenderer};

use document::Document;

/// Run the Boxwood CLI application
///
/// # Errors
///
/// Returns `BoxwoodError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid input documents
/// - Layout and rendering errors, including an empty diagram
pub fn run(args: &Args) -> Result<(), BoxwoodError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let diagram = Document::parse(&source)?.into_diagram()?;

    let renderer = DiagramRenderer::new(app_config);
    let image = renderer.render_raster(&diagram)?;
    fs::write(&args.output, image.encode_png()?)?;
    info!(output_file = args.output; "PNG exported successfully");

    if let Some(path) = args.plantuml_path() {
        fs::write(&path, renderer.render_plantuml(&diagram))?;
        info!(output_file = path.display().to_string(); "PlantUML exported successfully");
    }

    if let Some(path) = &args.svg {
        fs::write(path, renderer.render_svg(&diagram)?)?;
        info!(output_file = path.as_str(); "SVG exported successfully");
    }

    Ok(())
}
