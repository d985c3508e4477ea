//! Configuration types for Boxwood diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources, and every field has a default,
//! so a partial document only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Box padding and the spacing of the tree layout.
//! - [`StyleConfig`] - Colors and fonts.
//!
//! # Example
//!
//! ```
//! # use boxwood::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.layout().sibling_spacing(), 70.0);
//! ```

use serde::Deserialize;

use boxwood_core::{
    color::Color,
    draw::{BoxStyle, FontWeight, StrokeStyle, TextDefinition},
};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks both sections.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.style.validate()
    }

    /// Box padding and fonts, as consumed by sizing and painting.
    pub fn box_style(&self) -> BoxStyle {
        BoxStyle {
            h_padding: self.layout.h_padding,
            v_padding: self.layout.v_padding,
            header_gap: self.layout.header_gap,
            line_spacing: self.layout.line_spacing,
            border_width: self.style.border_width,
            title_text: self.style.title_text(),
            body_text: self.style.body_text(),
        }
    }
}

/// Padding and spacing in pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    h_padding: f32,
    v_padding: f32,
    header_gap: f32,
    line_spacing: f32,
    level_spacing: f32,
    sibling_spacing: f32,
    root_spacing: f32,
    margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            h_padding: 18.0,
            v_padding: 14.0,
            header_gap: 10.0,
            line_spacing: 4.0,
            level_spacing: 90.0,
            sibling_spacing: 70.0,
            root_spacing: 90.0,
            margin: 60.0,
        }
    }
}

impl LayoutConfig {
    /// Overrides the three tree spacings.
    pub fn with_spacing(mut self, level: f32, sibling: f32, root: f32) -> Self {
        self.level_spacing = level;
        self.sibling_spacing = sibling;
        self.root_spacing = root;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Horizontal padding between a box's border and its text.
    pub fn h_padding(&self) -> f32 {
        self.h_padding
    }

    /// Vertical padding above the title and below the last body line.
    pub fn v_padding(&self) -> f32 {
        self.v_padding
    }

    pub fn header_gap(&self) -> f32 {
        self.header_gap
    }

    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    /// Vertical gap between a parent box and its children's row.
    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    /// Horizontal gap between sibling subtrees.
    pub fn sibling_spacing(&self) -> f32 {
        self.sibling_spacing
    }

    /// Horizontal gap between forest roots.
    pub fn root_spacing(&self) -> f32 {
        self.root_spacing
    }

    /// Empty border on all four sides of the canvas.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Rejects negative or non-finite values and non-positive spacings.
    ///
    /// # Errors
    ///
    /// Returns a description naming the offending setting.
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("h_padding", self.h_padding),
            ("v_padding", self.v_padding),
            ("header_gap", self.header_gap),
            ("line_spacing", self.line_spacing),
            ("margin", self.margin),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("layout.{name} must be a finite, non-negative number, got {value}"));
            }
        }

        let positive = [
            ("level_spacing", self.level_spacing),
            ("sibling_spacing", self.sibling_spacing),
            ("root_spacing", self.root_spacing),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("layout.{name} must be a finite, positive number, got {value}"));
            }
        }
        Ok(())
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors are CSS color strings and are parsed when the renderer starts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: String,
    font_family: String,
    title_font_size: f32,
    body_font_size: f32,
    label_font_size: f32,
    tree_edge_color: String,
    reference_edge_color: String,
    association_style: String,
    edge_width: f32,
    border_width: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "#F5F5F5".to_string(),
            font_family: "sans-serif".to_string(),
            title_font_size: 18.0,
            body_font_size: 16.0,
            label_font_size: 14.0,
            tree_edge_color: "rgb(120, 120, 120)".to_string(),
            reference_edge_color: "rgb(90, 90, 90)".to_string(),
            association_style: "dashed".to_string(),
            edge_width: 2.0,
            border_width: 1.8,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Color, String> {
        Color::new(&self.background_color)
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Color of parent-to-child lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn tree_edge_color(&self) -> Result<Color, String> {
        Color::new(&self.tree_edge_color)
            .map_err(|err| format!("Invalid tree edge color in config: {err}"))
    }

    /// Color of reference connectors and their labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn reference_edge_color(&self) -> Result<Color, String> {
        Color::new(&self.reference_edge_color)
            .map_err(|err| format!("Invalid reference edge color in config: {err}"))
    }

    /// Line pattern of association edges: `solid`, `dashed` or a dash list
    /// such as `"6,4"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern cannot be parsed.
    pub fn association_style(&self) -> Result<StrokeStyle, String> {
        self.association_style
            .parse()
            .map_err(|err| format!("Invalid association style in config: {err}"))
    }

    pub fn edge_width(&self) -> f32 {
        self.edge_width
    }

    /// Bold title font.
    pub fn title_text(&self) -> TextDefinition {
        TextDefinition::new(&self.font_family, self.title_font_size).with_weight(FontWeight::Bold)
    }

    pub fn body_text(&self) -> TextDefinition {
        TextDefinition::new(&self.font_family, self.body_font_size)
    }

    /// Font of edge labels.
    pub fn label_text(&self) -> TextDefinition {
        TextDefinition::new(&self.font_family, self.label_font_size)
    }

    /// Checks colors, font sizes and stroke widths.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.background_color()?;
        self.tree_edge_color()?;
        self.reference_edge_color()?;
        self.association_style()?;

        let positive = [
            ("title_font_size", self.title_font_size),
            ("body_font_size", self.body_font_size),
            ("label_font_size", self.label_font_size),
            ("edge_width", self.edge_width),
            ("border_width", self.border_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("style.{name} must be a finite, positive number, got {value}"));
            }
        }
        if self.font_family.trim().is_empty() {
            return Err("style.font_family must not be empty".to_string());
        }
        Ok(())
    }
}
