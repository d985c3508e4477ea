//! Intrinsic box sizes.
//!
//! ```text
//! width  = 2·h_padding + max(title width, widest body line)
//! height = 2·v_padding + title line height
//!          + (body empty ? 0 : header_gap + Σ body line heights
//!                              + (lines − 1)·line_spacing)
//! ```

use boxwood_core::{
    draw::{BoxStyle, TextError, TextMeasure, TextMetrics},
    geometry::Size,
    semantic::Node,
};

/// A box's intrinsic size plus the text metrics it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxMeasure {
    size: Size,
    title: TextMetrics,
    body: Vec<TextMetrics>,
}

impl BoxMeasure {
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn title(&self) -> TextMetrics {
        self.title
    }

    /// Metrics of each body line, in order.
    pub fn body(&self) -> &[TextMetrics] {
        &self.body
    }
}

/// Computes [`BoxMeasure`]s with one text-metrics capability.
#[derive(Debug)]
pub struct BoxSizer<'a, M> {
    style: &'a BoxStyle,
    measure: M,
}

impl<'a, M: TextMeasure> BoxSizer<'a, M> {
    pub fn new(style: &'a BoxStyle, measure: M) -> Self {
        Self { style, measure }
    }

    pub fn style(&self) -> &BoxStyle {
        self.style
    }

    /// Measures the box for `node`.
    ///
    /// # Errors
    ///
    /// Fails if the title or any body line cannot be measured.
    pub fn size(&self, node: &Node) -> Result<BoxMeasure, TextError> {
        self.size_of(node.title(), node.lines())
    }

    /// Measures a box with the given title and body lines.
    ///
    /// # Errors
    ///
    /// Fails if the title or any body line cannot be measured.
    pub fn size_of<S: AsRef<str>>(&self, title: &str, lines: &[S]) -> Result<BoxMeasure, TextError> {
        let style = self.style;
        let title = self.measure.measure(title, &style.title_text)?;
        let body = lines
            .iter()
            .map(|line| self.measure.measure(line.as_ref(), &style.body_text))
            .collect::<Result<Vec<_>, _>>()?;

        let text_width = body
            .iter()
            .map(TextMetrics::width)
            .fold(title.width(), f32::max);
        let width = style.h_padding * 2.0 + text_width;

        let mut height = style.v_padding * 2.0 + title.line_height();
        if !body.is_empty() {
            let lines_height: f32 = body.iter().map(TextMetrics::line_height).sum();
            height += style.header_gap
                + lines_height
                + (body.len() - 1) as f32 * style.line_spacing;
        }

        Ok(BoxMeasure {
            size: Size::new(width, height),
            title,
            body,
        })
    }
}
