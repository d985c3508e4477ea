//! Integration tests for the DiagramRenderer API.

use float_cmp::assert_approx_eq;

use boxwood::{
    BoxwoodError, DiagramRenderer,
    color::Color,
    config::{AppConfig, LayoutConfig, StyleConfig},
    draw::FixedAdvanceMeasure,
    identifier::ElementId,
    palette::Palette,
    semantic::{Diagram, DiagramBuilder, Edge, EdgeKind, NodeId, NodeSpec},
};

struct Library {
    diagram: Diagram,
    a: NodeId,
    b: NodeId,
    c: NodeId,
}

/// Root `A` with children `B` and `C`, tree edges A→B and A→C, and an
/// association B→C labelled "ref".
fn library(prefix: &str, extra_edges: Vec<Edge>) -> Library {
    let key = |name: &str| ElementId::new(&format!("{prefix}-{name}"));
    let mut builder = DiagramBuilder::new();
    let a = builder.add_root(NodeSpec::new(key("a"), "A"));
    let b = builder
        .add_child(a, NodeSpec::new(key("b"), "B").with_line("x = 1"))
        .unwrap();
    let c = builder
        .add_child(a, NodeSpec::new(key("c"), "C").with_line("x = 1"))
        .unwrap();
    builder.add_containment_edges();
    builder.add_edge(Edge::new(key("b"), key("c"), EdgeKind::Association).with_label("ref"));
    for edge in extra_edges {
        builder.add_edge(edge);
    }
    Library {
        diagram: builder.build(),
        a,
        b,
        c,
    }
}

#[test]
fn test_parent_with_two_children_scenario() {
    let lib = library("scenario", vec![]);
    let renderer = DiagramRenderer::default();
    let layout = renderer
        .layout_with(&lib.diagram, FixedAdvanceMeasure::default())
        .expect("Failed to lay out");

    let (a, b, c) = (layout.get(lib.a), layout.get(lib.b), layout.get(lib.c));
    assert_eq!(b.subtree().width(), b.size().width());
    assert_eq!(c.subtree().width(), c.size().width());
    assert_approx_eq!(
        f32,
        a.subtree().width(),
        a.size().width().max(b.size().width() + c.size().width() + 70.0)
    );
    assert_approx_eq!(
        f32,
        layout.canvas().height(),
        a.size().height() + 90.0 + b.size().height().max(c.size().height()) + 120.0
    );

    let image = renderer
        .render_raster_with(&lib.diagram, FixedAdvanceMeasure::default())
        .expect("Failed to render");
    assert_eq!(image.width() as f32, layout.canvas().width());
    assert_eq!(image.height() as f32, layout.canvas().height());
    assert_eq!(image.pixels().len(), (image.width() * image.height() * 4) as usize);
    assert_eq!(image.pixel(0, 0), Some([245, 245, 245, 255]));
}

#[test]
fn test_header_band_uses_darkened_fill() {
    let lib = library("header", vec![]);
    let renderer = DiagramRenderer::default();
    let layout = renderer
        .layout_with(&lib.diagram, FixedAdvanceMeasure::default())
        .unwrap();
    let image = renderer
        .render_raster_with(&lib.diagram, FixedAdvanceMeasure::default())
        .unwrap();

    let fill = lib.diagram.node(lib.a).fill();
    let position = layout.get(lib.a).position();
    let pixel = image
        .pixel(position.x() as u32 + 3, position.y() as u32 + 3)
        .unwrap();
    assert_eq!(pixel, fill.darken(0.15).to_rgba8());
}

#[test]
fn test_empty_forest_is_nothing_to_render() {
    let diagram = DiagramBuilder::new().build();
    let renderer = DiagramRenderer::default();

    let raster = renderer.render_raster_with(&diagram, FixedAdvanceMeasure::default());
    assert!(matches!(raster, Err(BoxwoodError::NothingToRender)));
    let svg = renderer.render_svg_with(&diagram, FixedAdvanceMeasure::default());
    assert!(matches!(svg, Err(BoxwoodError::NothingToRender)));
}

#[test]
fn test_rendering_is_deterministic() {
    let renderer = DiagramRenderer::default();
    let first = library("determinism", vec![]);
    let second = library("determinism", vec![]);

    let fills = |diagram: &Diagram| -> Vec<Color> { diagram.nodes().map(|(_, n)| n.fill()).collect() };
    assert_eq!(fills(&first.diagram), fills(&second.diagram));

    let one = renderer
        .render_raster_with(&first.diagram, FixedAdvanceMeasure::default())
        .unwrap();
    let two = renderer
        .render_raster_with(&second.diagram, FixedAdvanceMeasure::default())
        .unwrap();
    assert_eq!(one.pixels(), two.pixels());
}

#[test]
fn test_dangling_edge_draws_nothing() {
    let renderer = DiagramRenderer::default();
    let plain = library("dangling", vec![]);
    let dangling = library(
        "dangling",
        vec![Edge::new(
            ElementId::new("dangling-b"),
            ElementId::new("dangling-outside"),
            EdgeKind::ContainedReference,
        )
        .with_label("gone")],
    );

    let expected = renderer
        .render_raster_with(&plain.diagram, FixedAdvanceMeasure::default())
        .unwrap();
    let actual = renderer
        .render_raster_with(&dangling.diagram, FixedAdvanceMeasure::default())
        .expect("Dangling edges must not fail the render");
    assert_eq!(expected.pixels(), actual.pixels());
    assert!(!renderer.render_plantuml(&dangling.diagram).contains("*-->"));
}

#[test]
fn test_svg_output_has_one_group_per_layer() {
    let lib = library("svg", vec![]);
    let svg = DiagramRenderer::default()
        .render_svg_with(&lib.diagram, FixedAdvanceMeasure::default())
        .unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    for layer in ["background", "tree-edge", "reference", "node"] {
        assert!(svg.contains(&format!("data-layer=\"{layer}\"")), "missing {layer}");
    }
    assert!(!svg.contains("data-layer=\"containment-reference\""));
}

#[test]
fn test_plantuml_lists_classes_and_relations() {
    let lib = library("puml", vec![]);
    let text = DiagramRenderer::default().render_plantuml(&lib.diagram);
    assert!(text.starts_with("@startuml\n"));
    assert!(text.contains("class C1 as \"B\\nx = 1\\n\" {\n}"));
    assert!(text.contains("C0 --> C1\nC0 --> C2\nC1 ..> C2 : ref\n"));
    assert!(text.ends_with("@enduml\n"));
}

#[test]
fn test_invalid_config_is_reported() {
    let style: StyleConfig = StyleConfig::default();
    let layout = LayoutConfig::default().with_spacing(90.0, -1.0, 90.0);
    let renderer = DiagramRenderer::new(AppConfig::new(layout, style));
    let lib = library("config", vec![]);

    let result = renderer.layout_with(&lib.diagram, FixedAdvanceMeasure::default());
    assert!(matches!(result, Err(BoxwoodError::Config(msg)) if msg.contains("sibling_spacing")));
}

#[test]
fn test_palette_exhaustion_and_contrast() {
    let mut builder = DiagramBuilder::new();
    for i in 0..11 {
        builder.add_root(
            NodeSpec::new(ElementId::new(&format!("palette-{i}")), format!("Node {i}"))
                .with_classifier(format!("Class{i}")),
        );
    }
    let palette: Vec<Color> = builder.palette().entries().map(|(_, color)| color).collect();
    assert_eq!(palette.len(), 11);
    for (i, color) in palette.iter().take(6).enumerate() {
        assert_eq!(*color, Palette::color_at(i));
    }

    let hues: Vec<f32> = (0..5).map(Palette::generated_hue).collect();
    for (k, (hue, color)) in hues.iter().zip(&palette[6..]).enumerate() {
        let step = k as f64 * 0.618_033_988_749_894_9;
        assert_approx_eq!(f32, *hue, (step - step.floor()) as f32, epsilon = 1e-6);
        assert_eq!(*color, Color::from_hsb(*hue, 0.42, 0.92));
    }
    for (i, a) in hues.iter().enumerate() {
        for b in &hues[i + 1..] {
            let distance = (a - b).abs().min(1.0 - (a - b).abs());
            assert!(distance > 0.14, "hues {a} and {b} are too close");
        }
    }

    let diagram = builder.build();
    for (_, node) in diagram.nodes() {
        for band in [node.fill().darken(0.15), node.fill().lighten(0.25)] {
            let text = band.readable_text_color();
            assert_ne!(band.is_light(), text.is_light(), "{band} vs {text}");
        }
    }
}
