//! Stroke and line-style definitions.
//!
//! - [`StrokeDefinition`]: color, width, dash style and cap of a line
//! - [`StrokeStyle`]: solid or a repeating dash pattern
//! - [`StrokeCap`]: how open line ends are finished
//!
//! Both backends read the same definition: the raster backend turns the dash
//! pattern into a `tiny_skia::StrokeDash`, the SVG backend into a
//! `stroke-dasharray` attribute.
//!
//! ```
//! use boxwood_core::{color::Color, draw::{StrokeCap, StrokeDefinition}};
//!
//! let edge = StrokeDefinition::dashed(Color::from_rgb8(90, 90, 90), 2.0, vec![10.0, 10.0])
//!     .with_cap(StrokeCap::Round);
//! assert_eq!(edge.style().to_svg_value().as_deref(), Some("10,10"));
//! ```

use std::str::FromStr;

use crate::color::Color;

/// Line pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Alternating dash and gap lengths, starting with a dash.
    Dashed(Vec<f32>),
}

impl StrokeStyle {
    /// Dash lengths, or `None` for solid lines.
    pub fn dash_pattern(&self) -> Option<&[f32]> {
        match self {
            Self::Solid => None,
            Self::Dashed(pattern) => Some(pattern),
        }
    }

    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        self.dash_pattern().map(|pattern| {
            pattern
                .iter()
                .map(|length| length.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
    }
}

impl FromStr for StrokeStyle {
    type Err = String;

    /// Parses `solid`, `dashed` (10,10) or an explicit comma-separated pattern.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed(vec![10.0, 10.0])),
            _ => {
                let pattern = s
                    .split(',')
                    .map(|part| part.trim().parse::<f32>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|err| format!("invalid dash pattern `{s}`: {err}"))?;
                if pattern.len() % 2 != 0 || pattern.iter().any(|len| !(*len > 0.0)) {
                    return Err(format!(
                        "invalid dash pattern `{s}`: expected an even number of positive lengths"
                    ));
                }
                Ok(Self::Dashed(pattern))
            }
        }
    }
}

/// Defines how line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    /// Flat cap at the exact endpoint
    #[default]
    Butt,
    /// Rounded cap extending beyond the endpoint by half the stroke width
    Round,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

/// Complete description of how a line is stroked.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
            cap: StrokeCap::Butt,
        }
    }

    /// Creates a dashed stroke with an explicit dash pattern.
    pub fn dashed(color: Color, width: f32, pattern: Vec<f32>) -> Self {
        Self {
            style: StrokeStyle::Dashed(pattern),
            ..Self::solid(color, width)
        }
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    /// Returns a copy drawn as a continuous line.
    pub fn to_solid(&self) -> Self {
        Self {
            style: StrokeStyle::Solid,
            ..self.clone()
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!("solid".parse::<StrokeStyle>(), Ok(StrokeStyle::Solid));
        assert_eq!(
            "dashed".parse::<StrokeStyle>(),
            Ok(StrokeStyle::Dashed(vec![10.0, 10.0]))
        );
        assert_eq!(
            "6, 3".parse::<StrokeStyle>(),
            Ok(StrokeStyle::Dashed(vec![6.0, 3.0]))
        );
        assert!("6,3,2".parse::<StrokeStyle>().is_err());
        assert!("6,-3".parse::<StrokeStyle>().is_err());
        assert!("wavy".parse::<StrokeStyle>().is_err());
    }

    #[test]
    fn test_stroke_style_svg_value() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(
            StrokeStyle::Dashed(vec![10.0, 2.5]).to_svg_value().as_deref(),
            Some("10,2.5")
        );
    }

    #[test]
    fn test_stroke_definition_builders() {
        let gray = Color::from_rgb8(90, 90, 90);
        let dashed = StrokeDefinition::dashed(gray, 2.0, vec![10.0, 10.0]).with_cap(StrokeCap::Round);
        assert_eq!(dashed.cap(), StrokeCap::Round);
        assert_eq!(dashed.style().dash_pattern(), Some(&[10.0, 10.0][..]));

        let solid = dashed.to_solid();
        assert_eq!(solid.style(), &StrokeStyle::Solid);
        assert_eq!(solid.color(), gray);
        assert_eq!(solid.width(), 2.0);
        assert_eq!(solid.cap(), StrokeCap::Round);
    }
}
