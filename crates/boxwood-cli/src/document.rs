//! The diagram document read by the CLI.
//!
//! A document is TOML: nested `[[roots]]` tables form the containment forest
//! and `[[edges]]` tables list the cross references.
//!
//! ```toml
//! [[roots]]
//! id = "library"
//! title = "Library"
//! classifier = "Library"
//! lines = ["name = \"City\""]
//!
//! [[roots.children]]
//! id = "book-1"
//! title = "Book"
//! containment = "books"
//!
//! [[edges]]
//! source = "book-1"
//! target = "library"
//! kind = "association"
//! label = "shelvedIn"
//! ```
//!
//! Tree edges are derived from the nesting; `[[edges]]` holds the other kinds.

use std::collections::HashSet;

use log::{debug, info};
use serde::Deserialize;

use boxwood::{
    BoxwoodError,
    color::Color,
    identifier::ElementId,
    semantic::{Diagram, DiagramBuilder, Edge, EdgeKind, NodeId, NodeSpec},
};

/// A parsed diagram document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    #[serde(default)]
    roots: Vec<NodeEntry>,
    #[serde(default)]
    edges: Vec<EdgeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeEntry {
    id: String,
    title: String,
    classifier: Option<String>,
    containment: Option<String>,
    fill: Option<String>,
    #[serde(default)]
    lines: Vec<String>,
    #[serde(default)]
    children: Vec<NodeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EdgeEntry {
    source: String,
    target: String,
    kind: EdgeKind,
    #[serde(default)]
    label: String,
}

impl NodeEntry {
    fn to_spec(&self) -> Result<NodeSpec, BoxwoodError> {
        let mut spec = NodeSpec::new(ElementId::new(&self.id), self.title.as_str())
            .with_lines(self.lines.iter().cloned());
        if let Some(classifier) = &self.classifier {
            spec = spec.with_classifier(classifier.as_str());
        }
        if let Some(containment) = &self.containment {
            spec = spec.with_containment(containment.as_str());
        }
        if let Some(fill) = &self.fill {
            let color = Color::new(fill)
                .map_err(|err| BoxwoodError::Input(format!("node `{}`: invalid fill: {err}", self.id)))?;
            spec = spec.with_fill(color);
        }
        Ok(spec)
    }
}

impl Document {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`BoxwoodError::Input`] if the text is not a valid document.
    pub fn parse(source: &str) -> Result<Self, BoxwoodError> {
        toml::from_str(source).map_err(|err| BoxwoodError::Input(err.to_string()))
    }

    /// Builds the diagram: nodes in document order, tree edges from the
    /// nesting, then the listed edges.
    ///
    /// # Errors
    ///
    /// Returns [`BoxwoodError::Input`] for an invalid fill color.
    pub fn into_diagram(self) -> Result<Diagram, BoxwoodError> {
        let mut builder = DiagramBuilder::new();

        // Depth-first, children in document order.
        let mut stack: Vec<(Option<NodeId>, NodeEntry)> =
            self.roots.into_iter().rev().map(|entry| (None, entry)).collect();
        let mut seen = HashSet::new();
        while let Some((parent, mut entry)) = stack.pop() {
            // First occurrence wins; a repeated id drops its whole subtree.
            if !seen.insert(entry.id.clone()) {
                debug!(id = entry.id; "Skipping repeated node");
                continue;
            }
            let spec = entry.to_spec()?;
            let id = match parent {
                Some(parent) => builder.add_child(parent, spec)?,
                None => builder.add_root(spec),
            };
            let children = std::mem::take(&mut entry.children);
            stack.extend(children.into_iter().rev().map(|child| (Some(id), child)));
        }
        builder.add_containment_edges();

        for edge in self.edges {
            debug!(source = edge.source, target = edge.target, kind:% = edge.kind; "Adding edge");
            builder.add_edge(
                Edge::new(ElementId::new(&edge.source), ElementId::new(&edge.target), edge.kind)
                    .with_label(edge.label),
            );
        }

        let diagram = builder.build();
        info!(nodes = diagram.len(), edges = diagram.edges().len(); "Document loaded");
        Ok(diagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r##"
        [[roots]]
        id = "doc-library"
        title = "Library"
        classifier = "Library"
        lines = ["name = \"City\""]

        [[roots.children]]
        id = "doc-book"
        title = "Book"
        containment = "books"
        fill = "#9dd4da"

        [[roots.children.children]]
        id = "doc-page"
        title = "Page"

        [[roots.children]]
        id = "doc-member"
        title = "Member"

        [[edges]]
        source = "doc-member"
        target = "doc-book"
        kind = "association"
        label = "borrows"
    "##;

    #[test]
    fn test_nesting_becomes_forest_in_document_order() {
        let diagram = Document::parse(LIBRARY).unwrap().into_diagram().unwrap();
        let titles: Vec<&str> = diagram
            .pre_order()
            .into_iter()
            .map(|id| diagram.node(id).title())
            .collect();
        assert_eq!(titles, ["Library", "Book", "Page", "Member"]);
        assert_eq!(diagram.roots().len(), 1);
    }

    #[test]
    fn test_tree_edges_precede_listed_edges() {
        let diagram = Document::parse(LIBRARY).unwrap().into_diagram().unwrap();
        let kinds: Vec<EdgeKind> = diagram.edges().iter().map(Edge::kind).collect();
        assert_eq!(
            kinds,
            [
                EdgeKind::TreeContainment,
                EdgeKind::TreeContainment,
                EdgeKind::TreeContainment,
                EdgeKind::Association
            ]
        );
        assert_eq!(diagram.edges()[0].label(), "books");
        assert_eq!(diagram.edges()[3].label(), "borrows");
    }

    #[test]
    fn test_explicit_fill_is_kept() {
        let diagram = Document::parse(LIBRARY).unwrap().into_diagram().unwrap();
        let book = diagram.index_of(ElementId::new("doc-book")).unwrap();
        assert_eq!(diagram.node(book).fill().to_rgba8(), [0x9d, 0xd4, 0xda, 255]);
    }

    #[test]
    fn test_repeated_id_keeps_first_subtree() {
        let source = r#"
            [[roots]]
            id = "doc-a"
            title = "A"

            [[roots.children]]
            id = "doc-b"
            title = "B"

            [[roots]]
            id = "doc-b"
            title = "B again"

            [[roots.children]]
            id = "doc-c"
            title = "C"
        "#;
        let diagram = Document::parse(source).unwrap().into_diagram().unwrap();
        let titles: Vec<&str> = diagram
            .pre_order()
            .into_iter()
            .map(|id| diagram.node(id).title())
            .collect();
        assert_eq!(titles, ["A", "B"]);
        assert_eq!(diagram.roots().len(), 1);
    }

    #[test]
    fn test_unknown_edge_kind_is_input_error() {
        let source = r#"
            [[edges]]
            source = "a"
            target = "b"
            kind = "dependency"
        "#;
        assert!(matches!(Document::parse(source), Err(BoxwoodError::Input(_))));
    }

    #[test]
    fn test_invalid_fill_is_input_error() {
        let source = r#"
            [[roots]]
            id = "doc-bad"
            title = "Bad"
            fill = "not a color"
        "#;
        let result = Document::parse(source).unwrap().into_diagram();
        assert!(matches!(result, Err(BoxwoodError::Input(msg)) if msg.contains("doc-bad")));
    }
}
