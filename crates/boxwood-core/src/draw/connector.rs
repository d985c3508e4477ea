//! Connectors between boxes and their end decorations.
//!
//! A [`Connector`] is a polyline with an optional [`Terminator`] at each
//! end and an optional label. Terminators share one geometric rule: the
//! direction of the adjacent segment, `atan2(dy, dx)`, orients a shape of
//! fixed size anchored at the endpoint.
//!
//! ```text
//!   source                                   target
//!     ◆───────────── label ─────────────────▶      contained reference
//!     ─ ─ ─ ─ ─ ─ ─  label  ─ ─ ─ ─ ─ ─ ─ ─ ▶      association
//!     ──────────────────────────────────────▷      generalization
//! ```

use std::f32::consts::{FRAC_PI_2, PI};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, Primitive, RenderLayer, StrokeDefinition, TextDefinition, TextRun},
    geometry::{Point, Size},
};

/// Length of arrowheads and hollow triangles along the line.
pub const ARROW_LENGTH: f32 = 14.0;

/// Angle between the line and each back edge of an arrowhead.
pub const ARROW_SIDE_ANGLE: f32 = PI / 6.0;

/// Distance from the source endpoint to the center of a diamond.
pub const DIAMOND_SIZE: f32 = 10.0;

/// Vertical offset of a label's baseline above the line's midpoint.
pub const LABEL_OFFSET: f32 = 6.0;

/// Decoration drawn at one end of a connector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    #[default]
    None,
    /// Arrowhead filled with the stroke color.
    FilledArrow,
    /// Arrowhead-shaped triangle filled with the canvas background.
    HollowTriangle,
    /// Diamond filled with the stroke color, sitting on the line.
    FilledDiamond,
}

#[derive(Debug, Clone)]
struct Label {
    text: String,
    definition: TextDefinition,
    color: Color,
}

/// A path between two boxes.
///
/// # Examples
///
/// ```
/// # use boxwood_core::{color::Color, geometry::Point};
/// # use boxwood_core::draw::{Connector, Drawable, RenderLayer, StrokeDefinition, Terminator};
/// let stroke = StrokeDefinition::solid(Color::from_rgb8(90, 90, 90), 2.0);
/// let connector = Connector::new(
///     vec![Point::new(0.0, 50.0), Point::new(200.0, 50.0)],
///     stroke,
///     RenderLayer::ContainmentReference,
/// )
/// .with_source(Terminator::FilledDiamond)
/// .with_target(Terminator::FilledArrow);
///
/// let output = connector.render_to_layers(Point::default());
/// assert_eq!(output.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Connector {
    path: Vec<Point>,
    stroke: StrokeDefinition,
    layer: RenderLayer,
    source: Terminator,
    target: Terminator,
    background: Color,
    label: Option<Label>,
}

impl Connector {
    /// Creates an undecorated connector along `path`.
    pub fn new(path: Vec<Point>, stroke: StrokeDefinition, layer: RenderLayer) -> Self {
        Self {
            path,
            stroke,
            layer,
            source: Terminator::None,
            target: Terminator::None,
            background: Color::from_rgb8(255, 255, 255),
            label: None,
        }
    }

    pub fn with_source(mut self, terminator: Terminator) -> Self {
        self.source = terminator;
        self
    }

    pub fn with_target(mut self, terminator: Terminator) -> Self {
        self.target = terminator;
        self
    }

    /// Sets the fill used by [`Terminator::HollowTriangle`].
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Attaches a label. Empty labels are not drawn.
    pub fn with_label(mut self, text: &str, definition: TextDefinition, color: Color) -> Self {
        self.label = (!text.is_empty()).then(|| Label {
            text: text.to_string(),
            definition,
            color,
        });
        self
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Left end of the label's baseline: the first segment's midpoint, raised
    /// by [`LABEL_OFFSET`].
    pub fn label_origin(&self) -> Option<Point> {
        let [start, next, ..] = self.path.as_slice() else {
            return None;
        };
        let mid = start.midpoint(*next);
        Some(Point::new(mid.x(), mid.y() - LABEL_OFFSET))
    }

    /// Triangle with its tip at `tip`, pointing away from `from`.
    pub fn arrow_head(from: Point, tip: Point) -> [Point; 3] {
        let angle = from.angle_to(tip);
        [
            tip,
            tip.polar_offset(angle + PI - ARROW_SIDE_ANGLE, ARROW_LENGTH),
            tip.polar_offset(angle + PI + ARROW_SIDE_ANGLE, ARROW_LENGTH),
        ]
    }

    /// Diamond with one tip at `start`, lying along the line towards `toward`.
    pub fn diamond(start: Point, toward: Point) -> [Point; 4] {
        let angle = start.angle_to(toward);
        let center = start.polar_offset(angle, DIAMOND_SIZE);
        [
            start,
            center.polar_offset(angle - FRAC_PI_2, DIAMOND_SIZE / 2.0),
            center.polar_offset(angle, DIAMOND_SIZE),
            center.polar_offset(angle + FRAC_PI_2, DIAMOND_SIZE / 2.0),
        ]
    }

    fn terminator(&self, terminator: Terminator, from: Point, end: Point) -> Option<Primitive> {
        let outline = self.stroke.to_solid();
        match terminator {
            Terminator::None => None,
            Terminator::FilledArrow => Some(Primitive::Polygon {
                points: Self::arrow_head(from, end).to_vec(),
                fill: Some(self.stroke.color()),
                stroke: None,
            }),
            Terminator::HollowTriangle => Some(Primitive::Polygon {
                points: Self::arrow_head(from, end).to_vec(),
                fill: Some(self.background),
                stroke: Some(outline),
            }),
            Terminator::FilledDiamond => Some(Primitive::Polygon {
                points: Self::diamond(end, from).to_vec(),
                fill: Some(self.stroke.color()),
                stroke: Some(outline),
            }),
        }
    }
}

impl Drawable for Connector {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let path: Vec<Point> = self.path.iter().map(|p| p.add_point(position)).collect();
        let [first, second, ..] = path.as_slice() else {
            return output;
        };
        let (first, second) = (*first, *second);
        let (before_last, last) = (path[path.len() - 2], path[path.len() - 1]);

        output.add_to_layer(
            self.layer,
            Primitive::Polyline {
                points: path,
                stroke: self.stroke.clone(),
            },
        );

        // Source decorations point back along the first segment.
        if let Some(primitive) = self.terminator(self.source, second, first) {
            output.add_to_layer(self.layer, primitive);
        }
        if let Some(primitive) = self.terminator(self.target, before_last, last) {
            output.add_to_layer(self.layer, primitive);
        }

        if let (Some(label), Some(origin)) = (&self.label, self.label_origin()) {
            output.add_to_layer(
                self.layer,
                Primitive::Text(TextRun::new(
                    label.text.clone(),
                    origin.add_point(position),
                    label.definition.clone(),
                    label.color,
                )),
            );
        }

        output
    }

    fn size(&self) -> Size {
        let Some(first) = self.path.first() else {
            return Size::default();
        };
        let (mut min, mut max) = (*first, *first);
        for p in &self.path {
            min = Point::new(min.x().min(p.x()), min.y().min(p.y()));
            max = Point::new(max.x().max(p.x()), max.y().max(p.y()));
        }
        let span = max.sub_point(min);
        Size::new(span.x(), span.y())
    }
}
