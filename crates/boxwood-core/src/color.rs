//! Color handling for Boxwood diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, adding the operations the renderer needs: RGB access,
//! HSB construction, shading, and the luminance-based text contrast rule.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};

/// Luminance above which dark text is used on a fill.
pub const LUMINANCE_THRESHOLD: f32 = 0.6;

const DARK_TEXT: [u8; 3] = [45, 45, 45];
const LIGHT_TEXT: [u8; 3] = [245, 245, 245];

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_rgba8().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use boxwood_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// assert_eq!(red.to_rgba8(), [255, 0, 0, 255]);
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates an opaque color from 8-bit sRGB channels.
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            color: DynamicColor::from_alpha_color(AlphaColor::<Srgb>::from_rgb8(red, green, blue)),
        }
    }

    /// Creates an opaque color from hue, saturation and brightness, each in `0.0..=1.0`.
    ///
    /// Only the fractional part of `hue` is used, so hues wrap around the color
    /// wheel. Channels are rounded to the nearest 8-bit value.
    ///
    /// # Examples
    ///
    /// ```
    /// use boxwood_core::color::Color;
    ///
    /// assert_eq!(Color::from_hsb(0.0, 1.0, 1.0).to_rgba8(), [255, 0, 0, 255]);
    /// assert_eq!(Color::from_hsb(0.5, 0.0, 1.0).to_rgba8(), [255, 255, 255, 255]);
    /// ```
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let channel = |value: f32| (value * 255.0 + 0.5) as u8;

        if saturation == 0.0 {
            let v = channel(brightness);
            return Self::from_rgb8(v, v, v);
        }

        let h = (hue - hue.floor()) * 6.0;
        let f = h - h.floor();
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));
        let (r, g, b) = match h as u8 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };

        Self::from_rgb8(channel(r), channel(g), channel(b))
    }

    /// Returns the color as `[red, green, blue, alpha]` 8-bit sRGB channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }

    /// Creates a new color with the specified alpha (transparency) value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Moves each channel towards white by `factor` (0.0 keeps the color, 1.0 gives white).
    pub fn lighten(self, factor: f32) -> Self {
        let [r, g, b, _] = self.to_rgba8();
        let shade = |c: u8| {
            let c = f32::from(c);
            clamp_channel(c + (255.0 - c) * factor)
        };
        Self::from_rgb8(shade(r), shade(g), shade(b))
    }

    /// Moves each channel towards black by `factor` (0.0 keeps the color, 1.0 gives black).
    pub fn darken(self, factor: f32) -> Self {
        let [r, g, b, _] = self.to_rgba8();
        let shade = |c: u8| clamp_channel(f32::from(c) * (1.0 - factor));
        Self::from_rgb8(shade(r), shade(g), shade(b))
    }

    /// Perceived luminance in `0.0..=1.0`, weighted `0.299R + 0.587G + 0.114B`.
    pub fn luminance(self) -> f32 {
        let [r, g, b, _] = self.to_rgba8();
        (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)) / 255.0
    }

    /// Returns `true` when the luminance exceeds [`LUMINANCE_THRESHOLD`].
    pub fn is_light(self) -> bool {
        self.luminance() > LUMINANCE_THRESHOLD
    }

    /// Picks dark text for light fills and light text for dark fills.
    ///
    /// # Examples
    ///
    /// ```
    /// use boxwood_core::color::Color;
    ///
    /// let on_white = Color::from_rgb8(255, 255, 255).readable_text_color();
    /// assert!(!on_white.is_light());
    ///
    /// let on_navy = Color::from_rgb8(0, 0, 128).readable_text_color();
    /// assert!(on_navy.is_light());
    /// ```
    pub fn readable_text_color(self) -> Self {
        let [r, g, b] = if self.is_light() {
            DARK_TEXT
        } else {
            LIGHT_TEXT
        };
        Self::from_rgb8(r, g, b)
    }

    /// Returns the color as a `#rrggbb` hex string, ignoring alpha.
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgb8(0, 0, 0)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_default_is_black() {
        assert_eq!(Color::default().to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_color_from_rgb8_roundtrips_channels() {
        let color = Color::from_rgb8(157, 212, 218);
        assert_eq!(color.to_rgba8(), [157, 212, 218, 255]);
        assert_eq!(color.to_hex(), "#9dd4da");
    }

    #[test]
    fn test_color_from_hsb_primaries() {
        assert_eq!(Color::from_hsb(0.0, 1.0, 1.0).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(
            Color::from_hsb(1.0 / 3.0, 1.0, 1.0).to_rgba8(),
            [0, 255, 0, 255]
        );
        assert_eq!(
            Color::from_hsb(2.0 / 3.0, 1.0, 1.0).to_rgba8(),
            [0, 0, 255, 255]
        );
        // Hue wraps around.
        assert_eq!(
            Color::from_hsb(1.0, 1.0, 1.0).to_rgba8(),
            Color::from_hsb(0.0, 1.0, 1.0).to_rgba8()
        );
    }

    #[test]
    fn test_color_from_hsb_pastel() {
        // Hue 0 at the palette's saturation/brightness.
        let [r, g, b, _] = Color::from_hsb(0.0, 0.42, 0.92).to_rgba8();
        assert_eq!(r, 235);
        assert_eq!(g, 136);
        assert_eq!(b, 136);
    }

    #[test]
    fn test_color_lighten_and_darken() {
        let base = Color::from_rgb8(100, 200, 50);
        assert_eq!(base.lighten(0.0), base);
        assert_eq!(base.lighten(1.0).to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(base.darken(1.0).to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(base.darken(0.5).to_rgba8(), [50, 100, 25, 255]);
    }

    #[test]
    fn test_color_luminance_extremes() {
        assert_approx_eq!(f32, Color::from_rgb8(0, 0, 0).luminance(), 0.0);
        assert_approx_eq!(
            f32,
            Color::from_rgb8(255, 255, 255).luminance(),
            1.0,
            epsilon = 0.0001
        );
    }

    #[test]
    fn test_color_readable_text_color() {
        let light_fill = Color::from_rgb8(253, 243, 196);
        assert_eq!(light_fill.readable_text_color().to_rgba8(), [45, 45, 45, 255]);

        let dark_fill = Color::from_rgb8(20, 40, 90);
        assert_eq!(
            dark_fill.readable_text_color().to_rgba8(),
            [245, 245, 245, 255]
        );
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap();
        let transparent = color.with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::from_rgb8(255, 0, 0);
        let color3 = Color::new("blue").unwrap();

        let mut set = HashSet::new();
        set.insert(color1.to_rgba8());
        assert!(set.contains(&color2.to_rgba8()));
        assert!(!set.contains(&color3.to_rgba8()));
    }
}
