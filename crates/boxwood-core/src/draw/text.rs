//! Text styling and the text-metrics capability.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Font family, pixel size and weight of one text role
//! - [`TextMetrics`] - Width, ascent and line height of a single measured line
//! - [`TextMeasure`] - The measuring capability layout depends on
//! - [`CosmicTextMeasure`] - Real shaping through `cosmic-text`
//! - [`FixedAdvanceMeasure`] - Per-character metrics for reproducible output
//! - [`draw_glyphs`] - Rasterizes one line of text through `cosmic-text`
//!
//! Every measured string is a single line. A string containing a line break
//! is rejected with [`TextError::Unmeasurable`] rather than wrapped or split.
//!
//! # Quick Start
//!
//! ```
//! # use boxwood_core::draw::{FixedAdvanceMeasure, TextDefinition, TextMeasure};
//! let body = TextDefinition::new("sans-serif", 16.0);
//! let metrics = FixedAdvanceMeasure::default().measure("x = 1", &body).unwrap();
//!
//! assert_eq!(metrics.width(), 48.0);
//! assert_eq!(metrics.line_height(), 20.0);
//! ```

use std::sync::{Mutex, MutexGuard, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, Weight};
use log::info;

use crate::color::Color;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Weight of a font face.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Returns the SVG font-weight value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// Font family, size in pixels and weight of one text role.
///
/// # Examples
///
/// ```
/// # use boxwood_core::draw::{FontWeight, TextDefinition};
/// let title = TextDefinition::new("sans-serif", 18.0).with_weight(FontWeight::Bold);
/// assert_eq!(title.font_size(), 18.0);
/// assert_eq!(title.weight(), FontWeight::Bold);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    weight: FontWeight,
}

impl TextDefinition {
    pub fn new(font_family: &str, font_size: f32) -> Self {
        Self {
            font_family: font_family.to_string(),
            font_size,
            weight: FontWeight::Normal,
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the font family for the text.
    ///
    /// The generic names `sans-serif`, `serif` and `monospace` map to the
    /// platform's default faces; anything else is looked up by name.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// Line height in whole pixels.
    pub fn line_height(&self) -> f32 {
        (self.font_size * LINE_HEIGHT_FACTOR).ceil()
    }

    fn attrs(&self) -> Attrs<'_> {
        let family = match self.font_family.as_str() {
            "sans-serif" => Family::SansSerif,
            "serif" => Family::Serif,
            "monospace" => Family::Monospace,
            name => Family::Name(name),
        };
        let weight = match self.weight {
            FontWeight::Normal => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        };
        Attrs::new().family(family).weight(weight)
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self::new("sans-serif", 16.0)
    }
}

/// Metrics of a single line of text, rounded up to whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    width: f32,
    ascent: f32,
    line_height: f32,
}

impl TextMetrics {
    pub fn new(width: f32, ascent: f32, line_height: f32) -> Self {
        Self {
            width: round_up(width),
            ascent: round_up(ascent),
            line_height: round_up(line_height),
        }
    }

    /// Advance width of the line.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Distance from the top of the line box to the baseline.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// Rounds up to a whole pixel, ignoring float noise just above an integer.
fn round_up(value: f32) -> f32 {
    (value - 0.001).ceil().max(0.0)
}

/// Text measurement failures. Each one is fatal to the rendering request.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("cannot measure `{text}`: {reason}")]
    Unmeasurable { text: String, reason: &'static str },

    #[error("font system is unavailable after a failed measurement")]
    FontSystemUnavailable,
}

impl TextError {
    fn line_break(text: &str) -> Self {
        Self::Unmeasurable {
            text: text.escape_debug().to_string(),
            reason: "text contains a line break",
        }
    }
}

/// Capability that turns a string and a font into pixel metrics.
pub trait TextMeasure {
    /// Measures one line of `text` set in `definition`.
    ///
    /// # Errors
    ///
    /// Returns a [`TextError`] if the text cannot be measured.
    fn measure(&self, text: &str, definition: &TextDefinition) -> Result<TextMetrics, TextError>;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure(&self, text: &str, definition: &TextDefinition) -> Result<TextMetrics, TextError> {
        (**self).measure(text, definition)
    }
}

fn check_single_line(text: &str) -> Result<(), TextError> {
    if text.contains(['\n', '\r']) {
        return Err(TextError::line_break(text));
    }
    Ok(())
}

/// Shared cosmic-text state. Creating a `FontSystem` scans the system fonts,
/// so it is built once per process.
struct Fonts {
    system: FontSystem,
    swash_cache: SwashCache,
}

static FONTS: OnceLock<Mutex<Fonts>> = OnceLock::new();

fn fonts() -> Result<MutexGuard<'static, Fonts>, TextError> {
    FONTS
        .get_or_init(|| {
            info!("Initializing FontSystem");
            Mutex::new(Fonts {
                system: FontSystem::new(),
                swash_cache: SwashCache::new(),
            })
        })
        .lock()
        .map_err(|_| TextError::FontSystemUnavailable)
}

/// Measures text by shaping it with the fonts installed on the system.
#[derive(Debug, Default, Clone, Copy)]
pub struct CosmicTextMeasure;

impl CosmicTextMeasure {
    pub fn new() -> Self {
        Self
    }
}

impl TextMeasure for CosmicTextMeasure {
    fn measure(&self, text: &str, definition: &TextDefinition) -> Result<TextMetrics, TextError> {
        check_single_line(text)?;

        let mut fonts = fonts()?;
        let line_height = definition.line_height();
        let metrics = Metrics::new(definition.font_size(), line_height);

        let mut buffer = Buffer::new(&mut fonts.system, metrics);
        let mut buffer = buffer.borrow_with(&mut fonts.system);
        buffer.set_size(None, None);
        buffer.set_text(text, &definition.attrs(), Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut width: f32 = 0.0;
        let mut ascent = definition.font_size() * 0.8;
        if let Some(run) = buffer.layout_runs().next() {
            ascent = run.line_y - run.line_top;
            if let Some(last) = run.glyphs.last() {
                width = last.x + last.w;
            }
        }

        Ok(TextMetrics::new(width, ascent, line_height))
    }
}

/// Deterministic metrics derived from the character count alone.
///
/// Every character advances by a fixed fraction of the font size, so
/// layouts computed with this measure are identical on every machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMeasure {
    advance: f32,
    bold_advance: f32,
}

impl FixedAdvanceMeasure {
    pub fn new(advance: f32, bold_advance: f32) -> Self {
        Self {
            advance,
            bold_advance,
        }
    }
}

impl Default for FixedAdvanceMeasure {
    fn default() -> Self {
        Self::new(0.6, 0.65)
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure(&self, text: &str, definition: &TextDefinition) -> Result<TextMetrics, TextError> {
        check_single_line(text)?;

        let advance = match definition.weight() {
            FontWeight::Normal => self.advance,
            FontWeight::Bold => self.bold_advance,
        };
        let size = definition.font_size();
        let width = text.chars().count() as f32 * size * advance;
        Ok(TextMetrics::new(width, size * 0.8, definition.line_height()))
    }
}

/// Rasterizes one line of `text` through cosmic-text.
///
/// `paint` receives `(x, y, width, height, rgba)` rectangles in pixels, with
/// `x` relative to the start of the line and `y` relative to the baseline.
///
/// # Errors
///
/// Fails under the same conditions as [`CosmicTextMeasure::measure`].
pub fn draw_glyphs<F>(
    text: &str,
    definition: &TextDefinition,
    color: Color,
    mut paint: F,
) -> Result<(), TextError>
where
    F: FnMut(i32, i32, u32, u32, [u8; 4]),
{
    check_single_line(text)?;
    if text.is_empty() {
        return Ok(());
    }

    let mut fonts = fonts()?;
    let Fonts {
        system,
        swash_cache,
    } = &mut *fonts;

    let metrics = Metrics::new(definition.font_size(), definition.line_height());
    let mut buffer = Buffer::new(system, metrics);
    let mut buffer = buffer.borrow_with(system);
    buffer.set_size(None, None);
    buffer.set_text(text, &definition.attrs(), Shaping::Advanced, None);
    buffer.shape_until_scroll(true);

    let baseline = buffer
        .layout_runs()
        .next()
        .map(|run| run.line_y.round() as i32)
        .unwrap_or_default();

    let [r, g, b, a] = color.to_rgba8();
    buffer.draw(
        swash_cache,
        cosmic_text::Color::rgba(r, g, b, a),
        |x, y, w, h, glyph_color| {
            paint(
                x,
                y - baseline,
                w,
                h,
                [glyph_color.r(), glyph_color.g(), glyph_color.b(), glyph_color.a()],
            );
        },
    );
    Ok(())
}
