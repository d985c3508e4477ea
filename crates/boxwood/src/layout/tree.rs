//! Two-pass tree layout.
//!
//! **Measure** (children before parents):
//!
//! ```text
//! children_width = Σ child.subtree_width + sibling_spacing·(n − 1)
//! subtree_width  = max(width, children_width)
//! subtree_height = height + (n > 0 ? level_spacing + max child.subtree_height : 0)
//! ```
//!
//! **Position** (parents before children), given a footprint origin `(x0, y)`:
//!
//! ```text
//! box.x       = x0 + ⌊(subtree_width − width) / 2⌋
//! first child = x0 + ⌊(subtree_width − children_width) / 2⌋, row at y + height + level_spacing
//! ```
//!
//! Roots sit left to right at the top margin, `root_spacing` apart. Sibling
//! footprints never overlap, so no edge inside one subtree crosses another.

use log::{debug, info, trace};

use boxwood_core::{
    draw::TextMeasure,
    geometry::{Bounds, Point, Size},
    semantic::{Diagram, NodeId},
};

use crate::{
    BoxwoodError,
    config::LayoutConfig,
    layout::{BoxMeasure, BoxSizer},
};

/// Final geometry of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxLayout {
    measure: BoxMeasure,
    subtree: Size,
    origin: Point,
    position: Point,
}

impl BoxLayout {
    pub fn measure(&self) -> &BoxMeasure {
        &self.measure
    }

    /// Intrinsic size of the box.
    pub fn size(&self) -> Size {
        self.measure.size()
    }

    /// Extent of the node together with all of its descendants.
    pub fn subtree(&self) -> Size {
        self.subtree
    }

    /// Top-left corner of the box.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size())
    }

    /// Area reserved for the node and its descendants.
    pub fn footprint(&self) -> Bounds {
        Bounds::new_from_top_left(self.origin, self.subtree)
    }
}

/// Positioned boxes of a whole diagram plus the canvas they fit on.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    boxes: Vec<BoxLayout>,
    canvas: Size,
}

impl Layout {
    /// Geometry of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to the diagram this layout was computed for.
    pub fn get(&self, id: NodeId) -> &BoxLayout {
        &self.boxes[id.index()]
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// The tree layout engine.
#[derive(Debug, Clone)]
pub struct Engine {
    level_spacing: f32,
    sibling_spacing: f32,
    root_spacing: f32,
    margin: f32,
}

impl Engine {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            level_spacing: config.level_spacing(),
            sibling_spacing: config.sibling_spacing(),
            root_spacing: config.root_spacing(),
            margin: config.margin(),
        }
    }

    /// Lays out every node of `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`BoxwoodError::NothingToRender`] for an empty forest, before
    /// any text is measured, and [`BoxwoodError::Text`] if a box cannot be
    /// measured.
    pub fn calculate<M: TextMeasure>(
        &self,
        diagram: &Diagram,
        sizer: &BoxSizer<'_, M>,
    ) -> Result<Layout, BoxwoodError> {
        if diagram.is_empty() {
            return Err(BoxwoodError::NothingToRender);
        }
        info!(nodes = diagram.len(), roots = diagram.roots().len(); "Calculating tree layout");

        let order = diagram.pre_order();

        let measures = diagram
            .nodes()
            .map(|(_, node)| sizer.size(node))
            .collect::<Result<Vec<_>, _>>()?;

        // Measure: reversed pre-order visits every child before its parent.
        let mut subtrees = vec![Size::default(); diagram.len()];
        for &id in order.iter().rev() {
            let own = measures[id.index()].size();
            let children = diagram.node(id).children();
            let children_width = self.row_width(children.iter().map(|c| subtrees[c.index()].width()));
            let tallest_child = children
                .iter()
                .map(|c| subtrees[c.index()].height())
                .fold(None, |tallest: Option<f32>, h| Some(tallest.map_or(h, |t| t.max(h))));

            let height = match tallest_child {
                Some(child_height) => own.height() + self.level_spacing + child_height,
                None => own.height(),
            };
            subtrees[id.index()] = Size::new(own.width().max(children_width), height);
        }

        // Position: roots first, then each parent places its child row.
        let mut origins = vec![Point::default(); diagram.len()];
        let mut positions = vec![Point::default(); diagram.len()];
        let mut x = self.margin;
        for root in diagram.roots() {
            origins[root.index()] = Point::new(x, self.margin);
            x += subtrees[root.index()].width() + self.root_spacing;
        }
        for &id in &order {
            let origin = origins[id.index()];
            let own = measures[id.index()].size();
            let subtree = subtrees[id.index()];
            let position = Point::new(origin.x() + centered(subtree.width(), own.width()), origin.y());
            positions[id.index()] = position;
            trace!(
                node = id.index(),
                x = position.x(),
                y = position.y(),
                width = own.width(),
                height = own.height(),
                subtree_width = subtree.width();
                "Positioned box"
            );

            let children = diagram.node(id).children();
            let children_width = self.row_width(children.iter().map(|c| subtrees[c.index()].width()));
            let row_y = position.y() + own.height() + self.level_spacing;
            let mut child_x = origin.x() + centered(subtree.width(), children_width);
            for child in children {
                origins[child.index()] = Point::new(child_x, row_y);
                child_x += subtrees[child.index()].width() + self.sibling_spacing;
            }
        }

        let roots = diagram.roots();
        let total_width = roots
            .iter()
            .map(|r| subtrees[r.index()].width())
            .sum::<f32>()
            + self.root_spacing * (roots.len() - 1) as f32;
        let max_height = roots
            .iter()
            .map(|r| subtrees[r.index()].height())
            .fold(0.0, f32::max);
        let canvas = Size::new(
            total_width + 2.0 * self.margin,
            max_height + 2.0 * self.margin,
        );
        debug!(width = canvas.width(), height = canvas.height(); "Canvas size");

        let boxes = measures
            .into_iter()
            .enumerate()
            .map(|(i, measure)| BoxLayout {
                measure,
                subtree: subtrees[i],
                origin: origins[i],
                position: positions[i],
            })
            .collect();

        Ok(Layout { boxes, canvas })
    }

    /// Width of subtrees laid side by side, `sibling_spacing` apart.
    fn row_width(&self, widths: impl Iterator<Item = f32>) -> f32 {
        let (sum, count) = widths.fold((0.0, 0usize), |(sum, count), w| (sum + w, count + 1));
        if count == 0 {
            0.0
        } else {
            sum + self.sibling_spacing * (count - 1) as f32
        }
    }
}

/// Offset that centers `inner` within `outer`, rounded down to a whole pixel.
fn centered(outer: f32, inner: f32) -> f32 {
    ((outer - inner) / 2.0).floor()
}
