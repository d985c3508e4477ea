//! SVG backend.
//!
//! The document has the canvas size as its `viewBox` and one `<g>` per
//! non-empty render layer, tagged with a `data-layer` attribute, in stacking
//! order.

use log::{debug, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use boxwood_core::{
    color::Color,
    draw::{Primitive, TextRun},
    geometry::Point,
};

use super::{Error, Exporter};
use crate::render::Scene;

/// Sets the stroke attributes of `$stroke` on an SVG element.
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        let mut elem = $element
            .set("stroke", stroke.color().to_hex())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width())
            .set("stroke-linecap", stroke.cap().to_svg_value());
        if let Some(dasharray) = stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }
        elem
    }};
}

/// Exports scenes as SVG document text.
#[derive(Debug, Default, Clone)]
pub struct SvgExporter;

impl SvgExporter {
    pub fn new() -> Self {
        Self
    }

    /// Builds the document without serializing it.
    pub fn render_document(&self, scene: &Scene) -> Document {
        let size = scene.size();
        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height());

        for (layer, primitives) in scene.output().groups() {
            debug!(layer = layer.name(), primitives = primitives.len(); "Rendering SVG layer");
            let group = primitives.into_iter().fold(
                svg_element::Group::new().set("data-layer", layer.name()),
                |group, primitive| add_primitive(group, primitive),
            );
            doc = doc.add(group);
        }
        doc
    }
}

impl Exporter for SvgExporter {
    type Output = String;

    fn export_scene(&mut self, scene: &Scene) -> Result<String, Error> {
        info!(
            width = scene.size().width(),
            height = scene.size().height();
            "Rendering SVG document"
        );
        Ok(self.render_document(scene).to_string())
    }
}

fn fill_attributes(color: Option<Color>) -> (String, f32) {
    match color {
        Some(color) => (color.to_hex(), color.alpha()),
        None => ("none".to_string(), 1.0),
    }
}

fn points_attribute(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn add_primitive(group: svg_element::Group, primitive: &Primitive) -> svg_element::Group {
    match primitive {
        Primitive::Rect {
            bounds,
            fill,
            stroke,
        } => {
            let (fill, fill_opacity) = fill_attributes(*fill);
            let mut rect = svg_element::Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("fill", fill)
                .set("fill-opacity", fill_opacity);
            if let Some(stroke) = stroke {
                rect = apply_stroke!(rect, stroke);
            }
            group.add(rect)
        }
        Primitive::Polyline { points, stroke } => {
            let line = svg_element::Polyline::new()
                .set("points", points_attribute(points))
                .set("fill", "none");
            group.add(apply_stroke!(line, stroke))
        }
        Primitive::Polygon {
            points,
            fill,
            stroke,
        } => {
            let (fill, fill_opacity) = fill_attributes(*fill);
            let mut polygon = svg_element::Polygon::new()
                .set("points", points_attribute(points))
                .set("fill", fill)
                .set("fill-opacity", fill_opacity);
            if let Some(stroke) = stroke {
                polygon = apply_stroke!(polygon, stroke);
            }
            group.add(polygon)
        }
        Primitive::Text(run) => group.add(text_element(run)),
    }
}

fn text_element(run: &TextRun) -> svg_element::Text {
    let definition = run.definition();
    svg_element::Text::new("")
        .set("x", run.origin().x())
        .set("y", run.origin().y())
        .set("font-family", definition.font_family())
        .set("font-size", definition.font_size())
        .set("font-weight", definition.weight().to_svg_value())
        .set("fill", run.color().to_hex())
        .add(SvgText::new(run.text()))
}
