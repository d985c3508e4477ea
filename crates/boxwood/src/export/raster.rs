//! Raster backend.
//!
//! Paints a [`Scene`] into a `tiny-skia` pixmap, layer by layer, with
//! anti-aliasing on. Text goes through
//! [`draw_glyphs`](boxwood_core::draw::draw_glyphs), one glyph coverage
//! rectangle at a time.

use log::{debug, info};
use tiny_skia::{
    FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};

use boxwood_core::{
    color::Color,
    draw::{Primitive, StrokeCap, StrokeDefinition, TextRun, draw_glyphs},
    geometry::{Bounds, Point},
};

use super::{Error, Exporter};
use crate::render::Scene;

/// A rendered diagram.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixmap: Pixmap,
}

impl RasterImage {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight (non-premultiplied) RGBA bytes, row by row.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect()
    }

    /// Straight RGBA of one pixel, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encodes the image as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if encoding fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        self.pixmap
            .encode_png()
            .map_err(|err| Error::Render(format!("PNG encoding failed: {err}")))
    }
}

/// Exports scenes as RGBA images.
#[derive(Debug, Clone)]
pub struct RasterExporter {
    draw_text: bool,
}

impl Default for RasterExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterExporter {
    pub fn new() -> Self {
        Self { draw_text: true }
    }

    /// Skips glyph rasterization. Geometry is unchanged.
    pub fn without_text(mut self) -> Self {
        self.draw_text = false;
        self
    }

    fn paint_primitive(&self, pixmap: &mut Pixmap, primitive: &Primitive) -> Result<(), Error> {
        match primitive {
            Primitive::Rect {
                bounds,
                fill,
                stroke,
            } => {
                let Some(rect) = to_rect(*bounds) else {
                    debug!(bounds:? = bounds; "Skipping degenerate rectangle");
                    return Ok(());
                };
                if let Some(fill) = fill {
                    pixmap.fill_rect(rect, &paint_for(*fill), Transform::identity(), None);
                }
                if let Some(stroke) = stroke {
                    stroke_path(pixmap, &PathBuilder::from_rect(rect), stroke);
                }
            }
            Primitive::Polyline { points, stroke } => {
                if let Some(path) = build_path(points, false) {
                    stroke_path(pixmap, &path, stroke);
                }
            }
            Primitive::Polygon {
                points,
                fill,
                stroke,
            } => {
                let Some(path) = build_path(points, true) else {
                    return Ok(());
                };
                if let Some(fill) = fill {
                    pixmap.fill_path(
                        &path,
                        &paint_for(*fill),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
                if let Some(stroke) = stroke {
                    stroke_path(pixmap, &path, stroke);
                }
            }
            Primitive::Text(run) => {
                if self.draw_text {
                    paint_text(pixmap, run)?;
                }
            }
        }
        Ok(())
    }
}

impl Exporter for RasterExporter {
    type Output = RasterImage;

    fn export_scene(&mut self, scene: &Scene) -> Result<RasterImage, Error> {
        let size = scene.size();
        let (width, height) = (size.width().ceil() as u32, size.height().ceil() as u32);
        info!(width = width, height = height; "Rasterizing scene");

        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| Error::Render(format!("cannot allocate a {width}x{height} pixmap")))?;

        for (layer, primitives) in scene.output().groups() {
            debug!(layer = layer.name(), primitives = primitives.len(); "Painting layer");
            for primitive in primitives {
                self.paint_primitive(&mut pixmap, primitive)?;
            }
        }

        Ok(RasterImage { pixmap })
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn to_rect(bounds: Bounds) -> Option<Rect> {
    Rect::from_xywh(bounds.min_x(), bounds.min_y(), bounds.width(), bounds.height())
}

fn build_path(points: &[Point], close: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.x(), first.y());
    for point in rest {
        builder.line_to(point.x(), point.y());
    }
    if close {
        builder.close();
    }
    builder.finish()
}

fn stroke_path(pixmap: &mut Pixmap, path: &Path, definition: &StrokeDefinition) {
    let stroke = Stroke {
        width: definition.width(),
        line_cap: match definition.cap() {
            StrokeCap::Butt => LineCap::Butt,
            StrokeCap::Round => LineCap::Round,
        },
        dash: definition
            .style()
            .dash_pattern()
            .and_then(|pattern| StrokeDash::new(pattern.to_vec(), 0.0)),
        ..Stroke::default()
    };
    pixmap.stroke_path(
        path,
        &paint_for(definition.color()),
        &stroke,
        Transform::identity(),
        None,
    );
}

fn paint_text(pixmap: &mut Pixmap, run: &TextRun) -> Result<(), Error> {
    let origin = run.origin();
    let (left, baseline) = (origin.x().round() as i32, origin.y().round() as i32);
    draw_glyphs(run.text(), run.definition(), run.color(), |x, y, w, h, [r, g, b, a]| {
        if a == 0 {
            return;
        }
        let Some(rect) = Rect::from_xywh((left + x) as f32, (baseline + y) as f32, w as f32, h as f32)
        else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use boxwood_core::{
        draw::{LayeredOutput, RenderLayer},
        geometry::Size,
    };

    use super::*;
    use crate::{config::AppConfig, render::Theme};

    fn gray() -> Color {
        Color::from_rgb8(90, 90, 90)
    }

    #[test]
    fn test_to_rect_rejects_empty_bounds() {
        let bounds = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(0.0, 10.0));
        assert!(to_rect(bounds).is_none());
    }

    #[test]
    fn test_build_path_needs_two_points() {
        assert!(build_path(&[], false).is_none());
        assert!(build_path(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)], false).is_some());
    }

    #[test]
    fn test_filled_rect_and_stroke_paint_pixels() {
        let mut pixmap = Pixmap::new(40, 40).unwrap();
        let exporter = RasterExporter::new().without_text();

        let bounds = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(20.0, 20.0));
        exporter
            .paint_primitive(&mut pixmap, &Primitive::filled_rect(bounds, gray()))
            .unwrap();
        let line = Primitive::line(
            Point::new(0.0, 35.5),
            Point::new(40.0, 35.5),
            StrokeDefinition::solid(Color::from_rgb8(200, 0, 0), 3.0),
        );
        exporter.paint_primitive(&mut pixmap, &line).unwrap();

        let image = RasterImage { pixmap };
        assert_eq!(image.pixel(20, 20), Some([90, 90, 90, 255]));
        assert_eq!(image.pixel(2, 2), Some([0, 0, 0, 0]));
        assert_eq!(image.pixel(20, 35), Some([200, 0, 0, 255]));
        assert_eq!(image.pixel(40, 0), None);
    }

    #[test]
    fn test_dashed_line_leaves_gaps() {
        let mut pixmap = Pixmap::new(60, 10).unwrap();
        let dashed = Primitive::line(
            Point::new(0.0, 5.0),
            Point::new(60.0, 5.0),
            StrokeDefinition::dashed(gray(), 4.0, vec![10.0, 10.0]),
        );
        RasterExporter::new().paint_primitive(&mut pixmap, &dashed).unwrap();

        let image = RasterImage { pixmap };
        assert_eq!(image.pixel(5, 5).map(|p| p[3]), Some(255));
        assert_eq!(image.pixel(15, 5).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_export_uses_canvas_size_and_background() {
        let theme = Theme::from_config(&AppConfig::default()).unwrap();
        let mut output = LayeredOutput::new();
        output.add_to_layer(
            RenderLayer::Background,
            Primitive::filled_rect(
                Bounds::new_from_top_left(Point::default(), Size::new(30.0, 20.0)),
                theme.background(),
            ),
        );
        let scene = Scene::from_parts(Size::new(30.0, 20.0), theme.background(), output);
        let image = RasterExporter::new().export_scene(&scene).unwrap();

        assert_eq!((image.width(), image.height()), (30, 20));
        assert_eq!(image.pixels().len(), 30 * 20 * 4);
        assert_eq!(image.pixel(29, 19), Some([245, 245, 245, 255]));
        assert!(image.encode_png().unwrap().starts_with(b"\x89PNG"));
    }
}
