//! Diagram model consumed by layout and rendering.
//!
//! A [`Diagram`] is a forest of boxes plus a flat list of typed edges. Nodes
//! live in an arena addressed by [`NodeId`]; the parent link is a plain index
//! and ownership flows from the arena alone. Edges refer to their endpoints by
//! [`ElementId`], so an edge may name an element that never made it into the
//! forest. Such edges are kept in the model and skipped by consumers via
//! [`Diagram::resolve`].
//!
//! # Pipeline Position
//!
//! ```text
//! Domain objects (external)
//!     ↓ DiagramBuilder
//! Diagram (these types)
//!     ↓ layout
//! Layout (sizes, subtree extents, origins)
//!     ↓ render
//! LayeredOutput
//!     ↓ export
//! RGBA raster / SVG / PlantUML text
//! ```

use std::{collections::HashMap, fmt};

use log::debug;
use serde::Deserialize;

use crate::{color::Color, identifier::ElementId, palette::Palette};

/// Index of a node inside a [`Diagram`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Errors raised while assembling a diagram.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("parent node {0} does not belong to this diagram")]
    UnknownParent(NodeId),
}

/// One visual box.
#[derive(Debug, Clone)]
pub struct Node {
    element: ElementId,
    title: String,
    lines: Vec<String>,
    classifier: Option<String>,
    containment: Option<String>,
    fill: Color,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    /// Identity of the domain object this box stands for.
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body lines in source order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Name of the feature through which the parent contains this node.
    pub fn containment(&self) -> Option<&str> {
        self.containment.as_deref()
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Description of a node handed to [`DiagramBuilder`].
///
/// # Examples
///
/// ```
/// use boxwood_core::{identifier::ElementId, semantic::NodeSpec};
///
/// let spec = NodeSpec::new(ElementId::new("book-1"), "Book")
///     .with_classifier("Book")
///     .with_line("title = Dune")
///     .with_line("pages = 412")
///     .with_containment("books");
/// assert_eq!(spec.title(), "Book");
/// ```
#[derive(Debug, Clone)]
pub struct NodeSpec {
    element: ElementId,
    title: String,
    lines: Vec<String>,
    classifier: Option<String>,
    containment: Option<String>,
    fill: Option<Color>,
}

impl NodeSpec {
    pub fn new(element: ElementId, title: impl Into<String>) -> Self {
        Self {
            element,
            title: title.into(),
            lines: Vec::new(),
            classifier: None,
            containment: None,
            fill: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Sets the classifier name used to pick the fill from the palette.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_containment(mut self, feature: impl Into<String>) -> Self {
        self.containment = Some(feature.into());
        self
    }

    /// Overrides the palette with a fixed fill.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// The closed set of connector kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// Parent-to-child link of the containment tree.
    TreeContainment,
    /// Reference whose target is owned through the reference.
    ContainedReference,
    /// Plain, non-owning reference.
    Association,
    /// Specialization to supertype.
    Generalization,
}

impl EdgeKind {
    /// Only associations are drawn with a dashed line.
    pub fn is_dashed(self) -> bool {
        matches!(self, Self::Association)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TreeContainment => "tree-containment",
            Self::ContainedReference => "contained-reference",
            Self::Association => "association",
            Self::Generalization => "generalization",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed connector between two elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: ElementId,
    target: ElementId,
    kind: EdgeKind,
    label: String,
}

impl Edge {
    pub fn new(source: ElementId, target: ElementId, kind: EdgeKind) -> Self {
        Self {
            source,
            target,
            kind,
            label: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn source(&self) -> ElementId {
        self.source
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Label text, empty when the edge has none.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Assembles a [`Diagram`] for one rendering request.
///
/// The builder owns the request's [`Palette`], so fill colors follow the
/// order in which nodes are added.
///
/// # Examples
///
/// ```
/// use boxwood_core::{
///     identifier::ElementId,
///     semantic::{DiagramBuilder, Edge, EdgeKind, NodeSpec},
/// };
///
/// let mut builder = DiagramBuilder::new();
/// let library = builder.add_root(NodeSpec::new(ElementId::new("lib"), "Library"));
/// builder
///     .add_child(library, NodeSpec::new(ElementId::new("b1"), "Book").with_containment("books"))
///     .unwrap();
/// builder.add_containment_edges();
/// builder.add_edge(Edge::new(ElementId::new("b1"), ElementId::new("lib"), EdgeKind::Association));
///
/// let diagram = builder.build();
/// assert_eq!(diagram.len(), 2);
/// assert_eq!(diagram.edges().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    index: HashMap<ElementId, NodeId>,
    edges: Vec<Edge>,
    palette: Palette,
}

impl DiagramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a forest root. A repeated identity returns the existing node.
    pub fn add_root(&mut self, spec: NodeSpec) -> NodeId {
        if let Some(existing) = self.existing(&spec) {
            return existing;
        }
        let id = self.insert(spec, None);
        self.roots.push(id);
        id
    }

    /// Appends a child under `parent`. A repeated identity returns the
    /// existing node and leaves both parents untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownParent`] if `parent` was not issued by
    /// this builder.
    pub fn add_child(&mut self, parent: NodeId, spec: NodeSpec) -> Result<NodeId, ModelError> {
        if parent.0 >= self.nodes.len() {
            return Err(ModelError::UnknownParent(parent));
        }
        if let Some(existing) = self.existing(&spec) {
            return Ok(existing);
        }
        let id = self.insert(spec, Some(parent));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Adds one tree-containment edge per parent-child link, in pre-order,
    /// labelled with the child's containment feature.
    pub fn add_containment_edges(&mut self) {
        let order = pre_order(&self.roots, &self.nodes);
        let mut added = 0usize;
        for id in order {
            let node = &self.nodes[id.0];
            for child in &node.children {
                let child = &self.nodes[child.0];
                let mut edge = Edge::new(node.element, child.element, EdgeKind::TreeContainment);
                if let Some(feature) = &child.containment {
                    edge = edge.with_label(feature.clone());
                }
                self.edges.push(edge);
                added += 1;
            }
        }
        debug!(edges = added; "Derived containment edges");
    }

    /// Palette assignments made so far.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn build(self) -> Diagram {
        Diagram {
            nodes: self.nodes,
            roots: self.roots,
            index: self.index,
            edges: self.edges,
        }
    }

    fn existing(&self, spec: &NodeSpec) -> Option<NodeId> {
        let existing = self.index.get(&spec.element).copied()?;
        debug!(
            element:% = spec.element,
            kept:% = existing;
            "Ignoring repeated element identity"
        );
        Some(existing)
    }

    fn insert(&mut self, spec: NodeSpec, parent: Option<NodeId>) -> NodeId {
        let fill = match spec.fill {
            Some(fill) => fill,
            None => self
                .palette
                .color_for(spec.classifier.as_deref().unwrap_or(&spec.title)),
        };
        let id = NodeId(self.nodes.len());
        self.index.insert(spec.element, id);
        self.nodes.push(Node {
            element: spec.element,
            title: spec.title,
            lines: spec.lines,
            classifier: spec.classifier,
            containment: spec.containment,
            fill,
            children: Vec::new(),
            parent,
        });
        id
    }
}

/// An immutable forest of boxes plus typed edges.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    index: HashMap<ElementId, NodeId>,
    edges: Vec<Edge>,
}

impl Diagram {
    /// Forest roots, left to right.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the node for an id issued by the builder of this diagram.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different builder and is out of range.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// All nodes in arena order, which is insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn index_of(&self, element: ElementId) -> Option<NodeId> {
        self.index.get(&element).copied()
    }

    /// Resolves both endpoints of `edge`, or `None` if either lies outside the forest.
    pub fn resolve(&self, edge: &Edge) -> Option<(NodeId, NodeId)> {
        Some((self.index_of(edge.source)?, self.index_of(edge.target)?))
    }

    /// Every node, each parent before its children, roots left to right.
    pub fn pre_order(&self) -> Vec<NodeId> {
        pre_order(&self.roots, &self.nodes)
    }
}

fn pre_order(roots: &[NodeId], nodes: &[Node]) -> Vec<NodeId> {
    let mut order = Vec::with_capacity(nodes.len());
    let mut stack: Vec<NodeId> = roots.iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        order.push(id);
        stack.extend(nodes[id.0].children.iter().rev().copied());
    }
    order
}
