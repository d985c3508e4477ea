//! Layer-based paint ordering.
//!
//! Drawables emit [`Primitive`]s tagged with a [`RenderLayer`]. Backends
//! consume them bottom to top, so edge lines are always capped by the boxes
//! they connect, whatever order the drawables were visited in.
//!
//! # Example
//!
//! ```
//! # use boxwood_core::{color::Color, geometry::{Bounds, Point, Size}};
//! # use boxwood_core::draw::{LayeredOutput, Primitive, RenderLayer};
//! let bounds = Bounds::new_from_top_left(Point::default(), Size::new(10.0, 10.0));
//!
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Node, Primitive::filled_rect(bounds, Color::default()));
//! output.add_to_layer(RenderLayer::Background, Primitive::filled_rect(bounds, Color::default()));
//!
//! let ordered = output.into_ordered();
//! assert_eq!(ordered[0].0, RenderLayer::Background);
//! assert_eq!(ordered[1].0, RenderLayer::Node);
//! ```

use crate::draw::Primitive;

/// Defines the paint layers of a diagram.
///
/// Layers are painted from bottom to top in the order defined by variant
/// declaration. The `Ord` derive uses declaration order, so the first variant
/// paints first (bottom), and the last variant paints last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas fill
    Background,
    /// Parent-to-child containment lines
    TreeEdge,
    /// Contained-reference connectors
    ContainmentReference,
    /// Association and generalization connectors
    Reference,
    /// Node boxes and their text
    Node,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::TreeEdge => "tree-edge",
            Self::ContainmentReference => "containment-reference",
            Self::Reference => "reference",
            Self::Node => "node",
        }
    }
}

/// Primitives collected by layer.
#[derive(Debug, Default, Clone)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, Primitive)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a primitive to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, primitive: Primitive) {
        self.items.push((layer, primitive));
    }

    /// Appends every primitive of `other` after the ones already collected.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no primitives in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterates in insertion order, without layer sorting.
    pub fn iter(&self) -> impl Iterator<Item = &(RenderLayer, Primitive)> {
        self.items.iter()
    }

    /// Consumes the output and returns primitives bottom layer first.
    ///
    /// Insertion order is preserved within a layer.
    pub fn into_ordered(mut self) -> Vec<(RenderLayer, Primitive)> {
        // Stable: nested boxes keep painting after their parent.
        self.items.sort_by_key(|(layer, _)| *layer);
        self.items
    }

    /// Groups primitives by layer, bottom first, keeping insertion order
    /// within each layer.
    ///
    /// Empty layers are skipped.
    pub fn groups(&self) -> Vec<(RenderLayer, Vec<&Primitive>)> {
        let mut sorted: Vec<&(RenderLayer, Primitive)> = self.items.iter().collect();
        sorted.sort_by_key(|(layer, _)| *layer);

        let mut groups: Vec<(RenderLayer, Vec<&Primitive>)> = Vec::new();
        for (layer, primitive) in sorted {
            match groups.last_mut() {
                Some((current, primitives)) if *current == *layer => primitives.push(primitive),
                _ => groups.push((*layer, vec![primitive])),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        geometry::{Bounds, Point, Size},
    };

    fn rect(tag: u8) -> Primitive {
        let bounds = Bounds::new_from_top_left(Point::default(), Size::new(1.0, 1.0));
        Primitive::filled_rect(bounds, Color::from_rgb8(tag, 0, 0))
    }

    fn tag(primitive: &Primitive) -> u8 {
        match primitive {
            Primitive::Rect { fill: Some(fill), .. } => fill.to_rgba8()[0],
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_layered_output_new() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.groups().is_empty());
    }

    #[test]
    fn test_layered_output_orders_layers_stably() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, rect(1));
        output.add_to_layer(RenderLayer::Reference, rect(2));
        output.add_to_layer(RenderLayer::Node, rect(3));
        output.add_to_layer(RenderLayer::Background, rect(4));
        output.add_to_layer(RenderLayer::TreeEdge, rect(5));

        let tags: Vec<_> = output
            .into_ordered()
            .iter()
            .map(|(_, primitive)| tag(primitive))
            .collect();
        assert_eq!(tags, [4, 5, 2, 1, 3]);
    }

    #[test]
    fn test_layered_output_merge_same_layer() {
        let mut first = LayeredOutput::new();
        first.add_to_layer(RenderLayer::Node, rect(1));

        let mut second = LayeredOutput::new();
        second.add_to_layer(RenderLayer::Node, rect(2));
        second.add_to_layer(RenderLayer::ContainmentReference, rect(3));

        first.merge(second);
        assert_eq!(first.len(), 3);

        let groups = first.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, RenderLayer::ContainmentReference);
        assert_eq!(groups[1].0, RenderLayer::Node);
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn test_layer_order_matches_paint_order() {
        assert!(RenderLayer::Background < RenderLayer::TreeEdge);
        assert!(RenderLayer::TreeEdge < RenderLayer::ContainmentReference);
        assert!(RenderLayer::ContainmentReference < RenderLayer::Reference);
        assert!(RenderLayer::Reference < RenderLayer::Node);
        assert_eq!(RenderLayer::TreeEdge.name(), "tree-edge");
    }
}
