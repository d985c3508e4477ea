//! Drawable components of a diagram.
//!
//! Layout decides where things go; drawables decide what gets painted
//! there. Each [`Drawable`] turns itself into backend-neutral [`Primitive`]s
//! on one or more [`RenderLayer`]s, and the export backends paint those
//! primitives bottom layer first.
//!
//! - [`NodeBox`] - A node's header band, body band, border and text
//! - [`Connector`] - A line between boxes with its [`Terminator`]s and label
//! - [`TextDefinition`], [`TextMeasure`] - Fonts and the text-metrics capability
//! - [`StrokeDefinition`] - Line color, width and dash pattern

mod connector;
mod layer;
mod node_box;
mod primitive;
mod stroke;
mod text;

pub use connector::{
    ARROW_LENGTH, ARROW_SIDE_ANGLE, Connector, DIAMOND_SIZE, LABEL_OFFSET, Terminator,
};
pub use layer::{LayeredOutput, RenderLayer};
pub use node_box::{BoxStyle, NodeBox};
pub use primitive::{Primitive, TextRun};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeStyle};
pub use text::{
    CosmicTextMeasure, FixedAdvanceMeasure, FontWeight, TextDefinition, TextError, TextMeasure,
    TextMetrics, draw_glyphs,
};

use crate::geometry::{Point, Size};

/// Something that can paint itself at a position.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// Box-like drawables treat `position` as their top-left corner;
    /// connectors carry absolute coordinates and treat it as an offset.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
