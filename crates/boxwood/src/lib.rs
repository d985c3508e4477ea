//! Boxwood - tree layout and rendering for box-and-arrow model diagrams.
//!
//! A collaborator extracts a forest of labelled boxes plus typed
//! cross-reference edges into a [`semantic::Diagram`]. Boxwood measures the
//! boxes, lays the forest out top-down without overlap, and paints it as an
//! RGBA image, an SVG document or PlantUML class-diagram text.

pub mod config;
pub mod export;
pub mod layout;
pub mod render;

mod error;

pub use boxwood_core::{color, draw, geometry, identifier, palette, semantic};

pub use error::BoxwoodError;

use log::{debug, info};

use boxwood_core::draw::{CosmicTextMeasure, TextMeasure};

use config::AppConfig;
use export::{Exporter, raster::RasterImage};
use layout::{BoxSizer, Engine, Layout};
use render::{Scene, Theme};

/// Entry point for laying out and rendering diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use boxwood::{DiagramRenderer, identifier::ElementId, semantic::{DiagramBuilder, NodeSpec}};
///
/// let mut builder = DiagramBuilder::new();
/// builder.add_root(NodeSpec::new(ElementId::new("library"), "Library"));
/// let diagram = builder.build();
///
/// let renderer = DiagramRenderer::default();
/// let image = renderer.render_raster(&diagram).expect("Failed to render");
/// let png = image.encode_png().expect("Failed to encode");
/// ```
#[derive(Debug, Default)]
pub struct DiagramRenderer {
    config: AppConfig,
}

impl DiagramRenderer {
    /// Creates a renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lays out `diagram` with system fonts.
    ///
    /// # Errors
    ///
    /// See [`DiagramRenderer::layout_with`].
    pub fn layout(&self, diagram: &semantic::Diagram) -> Result<Layout, BoxwoodError> {
        self.layout_with(diagram, CosmicTextMeasure::new())
    }

    /// Lays out `diagram` with the given text metrics.
    ///
    /// # Errors
    ///
    /// Returns [`BoxwoodError::NothingToRender`] for an empty forest,
    /// [`BoxwoodError::Config`] for an invalid configuration and
    /// [`BoxwoodError::Text`] if any box text cannot be measured.
    pub fn layout_with<M: TextMeasure>(
        &self,
        diagram: &semantic::Diagram,
        measure: M,
    ) -> Result<Layout, BoxwoodError> {
        if diagram.is_empty() {
            return Err(BoxwoodError::NothingToRender);
        }
        self.config.validate().map_err(BoxwoodError::Config)?;

        let style = self.config.box_style();
        let sizer = BoxSizer::new(&style, measure);
        let layout = Engine::new(self.config.layout()).calculate(diagram, &sizer)?;
        info!(
            width = layout.canvas().width(),
            height = layout.canvas().height();
            "Layout calculated"
        );
        Ok(layout)
    }

    /// Lays out `diagram` and assembles its scene.
    ///
    /// # Errors
    ///
    /// See [`DiagramRenderer::layout_with`].
    pub fn scene_with<M: TextMeasure>(
        &self,
        diagram: &semantic::Diagram,
        measure: M,
    ) -> Result<Scene, BoxwoodError> {
        let layout = self.layout_with(diagram, measure)?;
        let theme = Theme::from_config(&self.config)?;
        Ok(Scene::build(diagram, &layout, &theme))
    }

    /// Renders `diagram` to an RGBA image with system fonts.
    ///
    /// # Errors
    ///
    /// Fails if layout fails or the image cannot be painted. No partial image
    /// is returned.
    pub fn render_raster(&self, diagram: &semantic::Diagram) -> Result<RasterImage, BoxwoodError> {
        self.render_raster_with(diagram, CosmicTextMeasure::new())
    }

    /// Renders `diagram` to an RGBA image, sizing boxes with `measure`.
    ///
    /// # Errors
    ///
    /// Fails if layout fails or the image cannot be painted.
    pub fn render_raster_with<M: TextMeasure>(
        &self,
        diagram: &semantic::Diagram,
        measure: M,
    ) -> Result<RasterImage, BoxwoodError> {
        let scene = self.scene_with(diagram, measure)?;
        let image = export::raster::RasterExporter::new().export_scene(&scene)?;
        info!(width = image.width(), height = image.height(); "Raster rendered successfully");
        Ok(image)
    }

    /// Renders `diagram` to an SVG string with system fonts.
    ///
    /// # Errors
    ///
    /// Fails if layout fails.
    pub fn render_svg(&self, diagram: &semantic::Diagram) -> Result<String, BoxwoodError> {
        self.render_svg_with(diagram, CosmicTextMeasure::new())
    }

    /// Renders `diagram` to an SVG string, sizing boxes with `measure`.
    ///
    /// # Errors
    ///
    /// Fails if layout fails.
    pub fn render_svg_with<M: TextMeasure>(
        &self,
        diagram: &semantic::Diagram,
        measure: M,
    ) -> Result<String, BoxwoodError> {
        let scene = self.scene_with(diagram, measure)?;
        let svg = export::svg::SvgExporter::new().export_scene(&scene)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Serializes `diagram` as PlantUML class-diagram text.
    ///
    /// This needs no layout, so it also accepts an empty diagram.
    pub fn render_plantuml(&self, diagram: &semantic::Diagram) -> String {
        debug!(nodes = diagram.len(), edges = diagram.edges().len(); "Emitting PlantUML");
        export::plantuml::emit(diagram)
    }
}
