//! Backend-neutral paint operations.
//!
//! A scene is a list of [`Primitive`]s in canvas coordinates. Every backend
//! handles the same four shapes with an exhaustive match.

use crate::{
    color::Color,
    draw::{StrokeDefinition, TextDefinition},
    geometry::{Bounds, Point},
};

/// A single line of text anchored at its baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    text: String,
    origin: Point,
    definition: TextDefinition,
    color: Color,
}

impl TextRun {
    /// Creates a run whose first glyph starts at `origin.x()` on the baseline `origin.y()`.
    pub fn new(text: impl Into<String>, origin: Point, definition: TextDefinition, color: Color) -> Self {
        Self {
            text: text.into(),
            origin,
            definition,
            color,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Left end of the baseline.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// One paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Axis-aligned rectangle, filled and/or outlined.
    Rect {
        bounds: Bounds,
        fill: Option<Color>,
        stroke: Option<StrokeDefinition>,
    },
    /// Open path through `points`.
    Polyline {
        points: Vec<Point>,
        stroke: StrokeDefinition,
    },
    /// Closed path through `points`, filled and/or outlined.
    Polygon {
        points: Vec<Point>,
        fill: Option<Color>,
        stroke: Option<StrokeDefinition>,
    },
    Text(TextRun),
}

impl Primitive {
    /// Filled rectangle without an outline.
    pub fn filled_rect(bounds: Bounds, fill: Color) -> Self {
        Self::Rect {
            bounds,
            fill: Some(fill),
            stroke: None,
        }
    }

    /// Straight segment from `from` to `to`.
    pub fn line(from: Point, to: Point, stroke: StrokeDefinition) -> Self {
        Self::Polyline {
            points: vec![from, to],
            stroke,
        }
    }

    /// Returns the text run if this is a text primitive.
    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Self::Text(run) => Some(run),
            _ => None,
        }
    }
}
