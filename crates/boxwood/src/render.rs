//! Scene assembly.
//!
//! A [`Scene`] is the backend-neutral picture of a laid-out diagram: every
//! paint operation tagged with the [`RenderLayer`] that fixes its stacking
//! order. The raster and SVG exporters consume the same scene, so both
//! outputs agree on geometry.

use log::{debug, info};

use boxwood_core::{
    color::Color,
    draw::{
        BoxStyle, Connector, Drawable, LayeredOutput, NodeBox, Primitive, RenderLayer, StrokeCap,
        StrokeDefinition, StrokeStyle, Terminator, TextDefinition,
    },
    geometry::{Bounds, Point, Size},
    semantic::{Diagram, Edge, EdgeKind},
};

use crate::{BoxwoodError, config::AppConfig, layout::Layout};

/// Horizontal reach of a self-loop beyond the right edge of its box.
const SELF_LOOP_REACH: f32 = 30.0;
/// Upper bound for the half-height of a self-loop.
const SELF_LOOP_HALF_HEIGHT: f32 = 12.0;

/// Resolved colors, strokes and fonts for one rendering request.
#[derive(Debug, Clone)]
pub struct Theme {
    box_style: BoxStyle,
    background: Color,
    tree_edge: Color,
    reference_edge: Color,
    association_style: StrokeStyle,
    edge_width: f32,
    label_text: TextDefinition,
}

impl Theme {
    /// Parses the colors of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`BoxwoodError::Config`] if a configured color is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, BoxwoodError> {
        let style = config.style();
        Ok(Self {
            box_style: config.box_style(),
            background: style.background_color().map_err(BoxwoodError::Config)?,
            tree_edge: style.tree_edge_color().map_err(BoxwoodError::Config)?,
            reference_edge: style.reference_edge_color().map_err(BoxwoodError::Config)?,
            association_style: style.association_style().map_err(BoxwoodError::Config)?,
            edge_width: style.edge_width(),
            label_text: style.label_text(),
        })
    }

    pub fn box_style(&self) -> &BoxStyle {
        &self.box_style
    }

    pub fn background(&self) -> Color {
        self.background
    }

    fn edge_stroke(&self, kind: EdgeKind) -> StrokeDefinition {
        match kind {
            EdgeKind::TreeContainment => StrokeDefinition::solid(self.tree_edge, self.edge_width),
            EdgeKind::Association => match &self.association_style {
                StrokeStyle::Solid => StrokeDefinition::solid(self.reference_edge, self.edge_width),
                StrokeStyle::Dashed(pattern) => {
                    StrokeDefinition::dashed(self.reference_edge, self.edge_width, pattern.clone())
                        .with_cap(StrokeCap::Round)
                }
            },
            EdgeKind::ContainedReference | EdgeKind::Generalization => {
                StrokeDefinition::solid(self.reference_edge, self.edge_width)
            }
        }
    }
}

/// Everything a backend needs to paint one diagram.
#[derive(Debug, Clone)]
pub struct Scene {
    size: Size,
    background: Color,
    output: LayeredOutput,
}

impl Scene {
    /// Builds the scene for a diagram and its layout.
    ///
    /// Edges whose endpoints are not both in the forest are dropped.
    pub fn build(diagram: &Diagram, layout: &Layout, theme: &Theme) -> Self {
        let size = layout.canvas();
        let mut output = LayeredOutput::new();
        output.add_to_layer(
            RenderLayer::Background,
            Primitive::filled_rect(
                Bounds::new_from_top_left(Point::default(), size),
                theme.background,
            ),
        );

        let mut drawn = 0usize;
        for edge in diagram.edges() {
            let Some((source, target)) = diagram.resolve(edge) else {
                debug!(
                    source:% = edge.source(),
                    target:% = edge.target(),
                    kind:% = edge.kind();
                    "Dropping edge with an endpoint outside the diagram"
                );
                continue;
            };
            let source = layout.get(source).bounds();
            let target = layout.get(target).bounds();
            output.merge(edge_connector(edge, source, target, theme).render_to_layers(Point::default()));
            drawn += 1;
        }

        for id in diagram.pre_order() {
            let node = diagram.node(id);
            let placed = layout.get(id);
            let measure = placed.measure();
            let body = node
                .lines()
                .iter()
                .map(String::as_str)
                .zip(measure.body().iter().copied())
                .collect();
            let node_box = NodeBox::new(
                &theme.box_style,
                node.fill(),
                measure.size(),
                (node.title(), measure.title()),
                body,
            );
            output.merge(node_box.render_to_layers(placed.position()));
        }

        info!(
            edges = drawn,
            nodes = diagram.len(),
            primitives = output.len();
            "Scene assembled"
        );

        Self {
            size,
            background: theme.background,
            output,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(size: Size, background: Color, output: LayeredOutput) -> Self {
        Self {
            size,
            background,
            output,
        }
    }

    /// Canvas size in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn output(&self) -> &LayeredOutput {
        &self.output
    }
}

fn edge_connector(edge: &Edge, source: Bounds, target: Bounds, theme: &Theme) -> Connector {
    let kind = edge.kind();
    let path = match kind {
        _ if edge.is_self_loop() => self_loop(source),
        EdgeKind::TreeContainment => vec![source.bottom_center(), target.top_center()],
        EdgeKind::ContainedReference | EdgeKind::Association | EdgeKind::Generalization => {
            vec![source.right_center(), target.left_center()]
        }
    };
    let stroke = theme.edge_stroke(kind);
    let color = stroke.color();

    match kind {
        EdgeKind::TreeContainment => Connector::new(path, stroke, RenderLayer::TreeEdge),
        EdgeKind::ContainedReference => {
            Connector::new(path, stroke, RenderLayer::ContainmentReference)
                .with_source(Terminator::FilledDiamond)
                .with_target(Terminator::FilledArrow)
                .with_label(edge.label(), theme.label_text.clone(), color)
        }
        EdgeKind::Association => Connector::new(path, stroke, RenderLayer::Reference)
            .with_target(Terminator::FilledArrow)
            .with_label(edge.label(), theme.label_text.clone(), color),
        EdgeKind::Generalization => Connector::new(path, stroke, RenderLayer::Reference)
            .with_target(Terminator::HollowTriangle)
            .with_background(theme.background),
    }
}

/// Rectangular loop leaving the right side of `bounds` and returning into it.
fn self_loop(bounds: Bounds) -> Vec<Point> {
    let anchor = bounds.right_center();
    let half = SELF_LOOP_HALF_HEIGHT.min(bounds.height() / 4.0);
    let outer = anchor.x() + SELF_LOOP_REACH;
    vec![
        Point::new(anchor.x(), anchor.y() - half),
        Point::new(outer, anchor.y() - half),
        Point::new(outer, anchor.y() + half),
        Point::new(anchor.x(), anchor.y() + half),
    ]
}

#[cfg(test)]
mod tests {
    use boxwood_core::{
        draw::FixedAdvanceMeasure,
        identifier::ElementId,
        semantic::{DiagramBuilder, NodeId, NodeSpec},
    };

    use super::*;
    use crate::layout::{BoxSizer, Engine};

    struct Fixture {
        diagram: Diagram,
        layout: Layout,
        theme: Theme,
        ids: Vec<NodeId>,
    }

    fn fixture(edges: Vec<Edge>) -> Fixture {
        let mut builder = DiagramBuilder::new();
        let a = builder.add_root(NodeSpec::new(ElementId::new("scene-a"), "A"));
        let b = builder
            .add_child(a, NodeSpec::new(ElementId::new("scene-b"), "B").with_line("x = 1"))
            .unwrap();
        let c = builder
            .add_child(a, NodeSpec::new(ElementId::new("scene-c"), "C").with_line("x = 1"))
            .unwrap();
        for edge in edges {
            builder.add_edge(edge);
        }
        let diagram = builder.build();

        let config = AppConfig::default();
        let theme = Theme::from_config(&config).unwrap();
        let sizer = BoxSizer::new(theme.box_style(), FixedAdvanceMeasure::default());
        let layout = Engine::new(config.layout()).calculate(&diagram, &sizer).unwrap();
        Fixture {
            diagram,
            layout,
            theme,
            ids: vec![a, b, c],
        }
    }

    fn layer_items(scene: &Scene, layer: RenderLayer) -> Vec<&Primitive> {
        scene
            .output()
            .iter()
            .filter(|(l, _)| *l == layer)
            .map(|(_, p)| p)
            .collect()
    }

    fn polyline(primitives: &[&Primitive]) -> (Vec<Point>, StrokeDefinition) {
        primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Polyline { points, stroke } => Some((points.clone(), stroke.clone())),
                _ => None,
            })
            .expect("connector line")
    }

    #[test]
    fn test_background_covers_canvas() {
        let f = fixture(vec![]);
        let scene = Scene::build(&f.diagram, &f.layout, &f.theme);
        let background = layer_items(&scene, RenderLayer::Background);
        assert_eq!(background.len(), 1);
        let Primitive::Rect { bounds, fill, .. } = background[0] else {
            panic!("background must be a rect");
        };
        assert_eq!(bounds.to_size(), f.layout.canvas());
        assert_eq!(fill.unwrap().to_rgba8(), [245, 245, 245, 255]);
    }

    #[test]
    fn test_tree_edge_runs_bottom_center_to_top_center() {
        let f = fixture(vec![Edge::new(
            ElementId::new("scene-a"),
            ElementId::new("scene-b"),
            EdgeKind::TreeContainment,
        )
        .with_label("ignored")]);
        let scene = Scene::build(&f.diagram, &f.layout, &f.theme);
        let items = layer_items(&scene, RenderLayer::TreeEdge);
        assert_eq!(items.len(), 1, "tree edges carry no decorations or labels");

        let (points, stroke) = polyline(&items);
        assert_eq!(points[0], f.layout.get(f.ids[0]).bounds().bottom_center());
        assert_eq!(points[1], f.layout.get(f.ids[1]).bounds().top_center());
        assert_eq!(stroke.color().to_rgba8(), [120, 120, 120, 255]);
    }

    #[test]
    fn test_association_is_dashed_with_label() {
        let f = fixture(vec![Edge::new(
            ElementId::new("scene-b"),
            ElementId::new("scene-c"),
            EdgeKind::Association,
        )
        .with_label("ref")]);
        let scene = Scene::build(&f.diagram, &f.layout, &f.theme);
        let items = layer_items(&scene, RenderLayer::Reference);

        let (points, stroke) = polyline(&items);
        assert_eq!(points[0], f.layout.get(f.ids[1]).bounds().right_center());
        assert_eq!(points[1], f.layout.get(f.ids[2]).bounds().left_center());
        assert!(stroke.style().dash_pattern().is_some());
        assert!(items.iter().any(|p| p.as_text().is_some_and(|t| t.text() == "ref")));
    }

    #[test]
    fn test_generalization_triangle_uses_background_fill() {
        let f = fixture(vec![Edge::new(
            ElementId::new("scene-b"),
            ElementId::new("scene-c"),
            EdgeKind::Generalization,
        )
        .with_label("never drawn")]);
        let scene = Scene::build(&f.diagram, &f.layout, &f.theme);
        let items = layer_items(&scene, RenderLayer::Reference);

        assert!(items.iter().all(|p| p.as_text().is_none()));
        let triangle_fill = items.iter().find_map(|p| match p {
            Primitive::Polygon { fill, .. } => *fill,
            _ => None,
        });
        assert_eq!(triangle_fill, Some(f.theme.background()));
    }

    #[test]
    fn test_dangling_edge_is_dropped() {
        let f = fixture(vec![Edge::new(
            ElementId::new("scene-b"),
            ElementId::new("scene-outside"),
            EdgeKind::Association,
        )]);
        let scene = Scene::build(&f.diagram, &f.layout, &f.theme);
        assert!(layer_items(&scene, RenderLayer::Reference).is_empty());
    }

    #[test]
    fn test_self_loop_leaves_and_reenters_right_side() {
        let f = fixture(vec![Edge::new(
            ElementId::new("scene-b"),
            ElementId::new("scene-b"),
            EdgeKind::Association,
        )]);
        let scene = Scene::build(&f.diagram, &f.layout, &f.theme);
        let (points, _) = polyline(&layer_items(&scene, RenderLayer::Reference));

        let bounds = f.layout.get(f.ids[1]).bounds();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].x(), bounds.max_x());
        assert_eq!(points[3].x(), bounds.max_x());
        assert_eq!(points[1].x(), bounds.max_x() + SELF_LOOP_REACH);
        assert!(points[0].y() < points[3].y());
    }

    #[test]
    fn test_boxes_paint_parent_before_children() {
        let f = fixture(vec![]);
        let scene = Scene::build(&f.diagram, &f.layout, &f.theme);
        let titles: Vec<&str> = layer_items(&scene, RenderLayer::Node)
            .into_iter()
            .filter_map(Primitive::as_text)
            .map(|t| t.text())
            .filter(|t| t.len() == 1)
            .collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }
}
