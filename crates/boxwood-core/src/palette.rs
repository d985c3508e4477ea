//! Deterministic classifier-to-color assignment.
//!
//! A [`Palette`] hands out fill colors by classifier name. The first six
//! distinct names receive hand-picked pastel tones in first-seen order;
//! every later name receives an HSB color whose hue advances by the golden
//! ratio conjugate, which spreads consecutive hues as far apart as possible
//! without knowing the total count up front.
//!
//! A palette is scoped to one rendering request. Two requests never share
//! assignments, and replaying the same request order reproduces the same
//! colors.
//!
//! # Examples
//!
//! ```
//! use boxwood_core::palette::{CURATED, Palette};
//!
//! let mut palette = Palette::new();
//! let order = palette.color_for("Order");
//! let item = palette.color_for("Item");
//!
//! assert_eq!(order.to_rgba8()[..3], CURATED[0]);
//! assert_eq!(item.to_rgba8()[..3], CURATED[1]);
//! assert_eq!(palette.color_for("Order"), order);
//! ```

use indexmap::IndexMap;
use log::trace;

use crate::color::Color;

/// Hand-picked pastel tones, as RGB triples, used before falling back to generated hues.
pub const CURATED: [[u8; 3]; 6] = [
    [157, 212, 218],
    [253, 243, 196],
    [209, 224, 180],
    [215, 205, 233],
    [252, 219, 203],
    [201, 229, 242],
];

/// Golden ratio conjugate, `(sqrt(5) - 1) / 2`.
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_894_9;

/// Saturation of generated colors.
pub const GENERATED_SATURATION: f32 = 0.42;

/// Brightness of generated colors.
pub const GENERATED_BRIGHTNESS: f32 = 0.92;

/// Memoized name-to-color assignment for a single diagram.
#[derive(Debug, Default, Clone)]
pub struct Palette {
    assigned: IndexMap<String, Color>,
}

impl Palette {
    /// Creates an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the color for `classifier`, assigning the next one on first sight.
    pub fn color_for(&mut self, classifier: &str) -> Color {
        if let Some(color) = self.assigned.get(classifier) {
            return *color;
        }

        let index = self.assigned.len();
        let color = Self::color_at(index);
        trace!(classifier = classifier, index = index; "Assigned palette color");
        self.assigned.insert(classifier.to_string(), color);
        color
    }

    /// Color handed out to the `index`-th distinct classifier.
    pub fn color_at(index: usize) -> Color {
        match index.checked_sub(CURATED.len()) {
            None => {
                let [r, g, b] = CURATED[index];
                Color::from_rgb8(r, g, b)
            }
            Some(overflow) => Color::from_hsb(
                Self::generated_hue(overflow),
                GENERATED_SATURATION,
                GENERATED_BRIGHTNESS,
            ),
        }
    }

    /// Hue in `0.0..1.0` of the `overflow`-th generated color.
    ///
    /// # Examples
    ///
    /// ```
    /// use boxwood_core::palette::Palette;
    ///
    /// assert_eq!(Palette::generated_hue(0), 0.0);
    /// assert!((Palette::generated_hue(1) - 0.618).abs() < 0.001);
    /// assert!((Palette::generated_hue(2) - 0.236).abs() < 0.001);
    /// ```
    pub fn generated_hue(overflow: usize) -> f32 {
        let hue = overflow as f64 * GOLDEN_RATIO_CONJUGATE;
        (hue - hue.floor()) as f32
    }

    /// Assignments in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Color)> {
        self.assigned
            .iter()
            .map(|(name, color)| (name.as_str(), *color))
    }

    /// Number of distinct classifiers seen so far.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// Returns `true` if no color has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
