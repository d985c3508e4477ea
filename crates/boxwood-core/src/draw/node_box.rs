//! The box drawn for one diagram node.
//!
//! A [`NodeBox`] paints, back to front:
//!
//! ```text
//! ┌──────────────────────────┐  ← border (fill darkened 35%)
//! │          Title           │  ← header band (fill darkened 15%)
//! ├──────────────────────────┤  ← separator rule, only with body lines
//! │ attribute = value        │  ← body band (fill lightened 25%)
//! │ other = value            │
//! └──────────────────────────┘
//! ```
//!
//! Header and body text colors are picked independently by the luminance
//! rule of [`Color::readable_text_color`].

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, Primitive, RenderLayer, StrokeDefinition, TextDefinition, TextMetrics, TextRun},
    geometry::{Bounds, Point, Size},
};

/// Shading applied to a node's fill.
const BODY_LIGHTEN: f32 = 0.25;
const HEADER_DARKEN: f32 = 0.15;
const BORDER_DARKEN: f32 = 0.35;

/// Padding, spacing and fonts shared by every box of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    pub h_padding: f32,
    pub v_padding: f32,
    /// Gap between the separator rule and the first body line.
    pub header_gap: f32,
    /// Extra space between consecutive body lines.
    pub line_spacing: f32,
    pub border_width: f32,
    pub title_text: TextDefinition,
    pub body_text: TextDefinition,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            h_padding: 18.0,
            v_padding: 14.0,
            header_gap: 10.0,
            line_spacing: 4.0,
            border_width: 1.8,
            title_text: TextDefinition::new("sans-serif", 18.0)
                .with_weight(crate::draw::FontWeight::Bold),
            body_text: TextDefinition::new("sans-serif", 16.0),
        }
    }
}

/// A measured node box ready to paint.
#[derive(Debug, Clone)]
pub struct NodeBox<'a> {
    style: &'a BoxStyle,
    fill: Color,
    size: Size,
    title: (&'a str, TextMetrics),
    body: Vec<(&'a str, TextMetrics)>,
}

impl<'a> NodeBox<'a> {
    /// Creates a box of `size` from already measured text.
    pub fn new(
        style: &'a BoxStyle,
        fill: Color,
        size: Size,
        title: (&'a str, TextMetrics),
        body: Vec<(&'a str, TextMetrics)>,
    ) -> Self {
        Self {
            style,
            fill,
            size,
            title,
            body,
        }
    }

    pub fn body_fill(&self) -> Color {
        self.fill.lighten(BODY_LIGHTEN)
    }

    pub fn header_fill(&self) -> Color {
        self.fill.darken(HEADER_DARKEN)
    }

    pub fn border_color(&self) -> Color {
        self.fill.darken(BORDER_DARKEN)
    }

    /// Distance from the top of the box to the bottom of the title line.
    pub fn title_bottom(&self) -> f32 {
        self.style.v_padding + self.title.1.line_height()
    }
}

impl Drawable for NodeBox<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let style = self.style;
        let bounds = Bounds::new_from_top_left(position, self.size);
        let border = StrokeDefinition::solid(self.border_color(), style.border_width);

        let body_fill = self.body_fill();
        let header_fill = self.header_fill();
        output.add_to_layer(RenderLayer::Node, Primitive::filled_rect(bounds, body_fill));

        let title_bottom = position.y() + self.title_bottom();
        let header_height = self.title_bottom().min(self.size.height());
        if header_height > 0.0 {
            output.add_to_layer(
                RenderLayer::Node,
                Primitive::filled_rect(bounds.with_max_y(position.y() + header_height), header_fill),
            );
        }

        output.add_to_layer(
            RenderLayer::Node,
            Primitive::Rect {
                bounds,
                fill: None,
                stroke: Some(border.clone()),
            },
        );

        if !self.body.is_empty() {
            output.add_to_layer(
                RenderLayer::Node,
                Primitive::line(
                    Point::new(bounds.min_x(), title_bottom),
                    Point::new(bounds.max_x(), title_bottom),
                    border,
                ),
            );
        }

        let (title, title_metrics) = self.title;
        let title_x = position.x() + ((self.size.width() - title_metrics.width()) / 2.0).floor();
        output.add_to_layer(
            RenderLayer::Node,
            Primitive::Text(TextRun::new(
                title,
                Point::new(title_x, position.y() + style.v_padding + title_metrics.ascent()),
                style.title_text.clone(),
                header_fill.readable_text_color(),
            )),
        );

        let body_color = body_fill.readable_text_color();
        let mut line_top = title_bottom + style.header_gap;
        for (line, metrics) in &self.body {
            output.add_to_layer(
                RenderLayer::Node,
                Primitive::Text(TextRun::new(
                    *line,
                    Point::new(position.x() + style.h_padding, line_top + metrics.ascent()),
                    style.body_text.clone(),
                    body_color,
                )),
            );
            line_top += metrics.line_height() + style.line_spacing;
        }

        output
    }

    fn size(&self) -> Size {
        self.size
    }
}
