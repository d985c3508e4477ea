//! PlantUML class-diagram text.
//!
//! The emitter does no layout. Nodes are listed sorted by title (case
//! insensitive, ties in pre-order) and named `C0`, `C1`, … in that order;
//! tree edges come first, then every other edge in insertion order.

use log::{debug, info};

use boxwood_core::semantic::{Diagram, EdgeKind, NodeId};

const HEADER: &str = "@startuml\n\
                      skinparam shadowing false\n\
                      skinparam classAttributeIconSize 0\n\
                      hide empty members\n";

/// Relation arrow for one edge kind.
fn arrow(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::TreeContainment => "-->",
        EdgeKind::ContainedReference => "*-->",
        EdgeKind::Association => "..>",
        EdgeKind::Generalization => "--|>",
    }
}

/// Escapes quotes and backslashes, and folds line breaks into `\n` so a
/// caption or label always stays on one line.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\r' => {
                chars.next_if_eq(&'\n');
                escaped.push_str("\\n");
            }
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Serializes `diagram` as a PlantUML class diagram.
///
/// Edges with an endpoint outside the diagram are skipped.
pub fn emit(diagram: &Diagram) -> String {
    let mut order = diagram.pre_order();
    order.sort_by_cached_key(|id| diagram.node(*id).title().to_lowercase());

    let mut names = vec![String::new(); diagram.len()];
    for (i, id) in order.iter().enumerate() {
        names[id.index()] = format!("C{i}");
    }
    let name = |id: NodeId| names[id.index()].as_str();

    let mut out = String::from(HEADER);
    for id in &order {
        let node = diagram.node(*id);
        out.push_str(&format!("class {} as \"{}\\n", name(*id), escape(node.title())));
        for line in node.lines() {
            out.push_str(&escape(line));
            out.push_str("\\n");
        }
        out.push_str("\" {\n}\n");
    }

    let (tree, other): (Vec<_>, Vec<_>) = diagram
        .edges()
        .iter()
        .partition(|edge| edge.kind() == EdgeKind::TreeContainment);
    let mut relations = 0usize;
    for edge in tree.into_iter().chain(other) {
        let Some((source, target)) = diagram.resolve(edge) else {
            debug!(source:% = edge.source(), target:% = edge.target(); "Skipping dangling relation");
            continue;
        };
        out.push_str(&format!("{} {} {}", name(source), arrow(edge.kind()), name(target)));
        if !edge.label().is_empty() {
            out.push_str(" : ");
            out.push_str(&escape(edge.label()));
        }
        out.push('\n');
        relations += 1;
    }
    out.push_str("@enduml\n");

    info!(classes = order.len(), relations = relations; "PlantUML emitted");
    out
}

#[cfg(test)]
mod tests {
    use boxwood_core::{
        identifier::ElementId,
        semantic::{DiagramBuilder, Edge, NodeSpec},
    };

    use super::*;

    fn id(key: &str) -> ElementId {
        ElementId::new(key)
    }

    #[test]
    fn test_nodes_sorted_by_title_case_insensitively() {
        let mut builder = DiagramBuilder::new();
        let root = builder.add_root(NodeSpec::new(id("puml-root"), "library"));
        builder
            .add_child(root, NodeSpec::new(id("puml-b"), "Book").with_line("title = \"Dune\""))
            .unwrap();
        builder
            .add_child(root, NodeSpec::new(id("puml-a"), "author"))
            .unwrap();
        let text = emit(&builder.build());

        let expected = "@startuml\n\
                        skinparam shadowing false\n\
                        skinparam classAttributeIconSize 0\n\
                        hide empty members\n\
                        class C0 as \"author\\n\" {\n}\n\
                        class C1 as \"Book\\ntitle = \\\"Dune\\\"\\n\" {\n}\n\
                        class C2 as \"library\\n\" {\n}\n\
                        @enduml\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_tree_edges_precede_references() {
        let mut builder = DiagramBuilder::new();
        let a = builder.add_root(NodeSpec::new(id("puml-e-a"), "A"));
        builder.add_child(a, NodeSpec::new(id("puml-e-b"), "B")).unwrap();
        builder.add_edge(
            Edge::new(id("puml-e-b"), id("puml-e-a"), EdgeKind::Association).with_label("ref"),
        );
        builder.add_edge(Edge::new(id("puml-e-b"), id("puml-e-a"), EdgeKind::Generalization));
        builder.add_edge(Edge::new(id("puml-e-a"), id("puml-e-b"), EdgeKind::ContainedReference));
        builder.add_containment_edges();
        let text = emit(&builder.build());

        let relations: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with("C"))
            .collect();
        assert_eq!(
            relations,
            ["C0 --> C1", "C1 ..> C0 : ref", "C1 --|> C0", "C0 *--> C1"]
        );
    }

    #[test]
    fn test_line_breaks_and_backslashes_are_escaped() {
        let mut builder = DiagramBuilder::new();
        let a = builder.add_root(NodeSpec::new(id("puml-x-a"), "A"));
        builder
            .add_child(a, NodeSpec::new(id("puml-x-b"), "B\nX").with_line("path = C:\\tmp"))
            .unwrap();
        builder.add_edge(
            Edge::new(id("puml-x-b"), id("puml-x-a"), EdgeKind::Association)
                .with_label("uses\r\n@enduml"),
        );
        let text = emit(&builder.build());

        assert_eq!(text.lines().filter(|line| *line == "@enduml").count(), 1);
        assert!(text.ends_with("@enduml\n"));
        assert!(text.contains("class C1 as \"B\\nX\\npath = C:\\\\tmp\\n\" {"));
        assert!(text.contains("C1 ..> C0 : uses\\n@enduml\n"));
        assert_eq!(text.lines().filter(|line| line.starts_with("class ")).count(), 2);
    }

    #[test]
    fn test_dangling_relation_is_skipped() {
        let mut builder = DiagramBuilder::new();
        builder.add_root(NodeSpec::new(id("puml-d-a"), "A"));
        builder.add_edge(Edge::new(id("puml-d-a"), id("puml-d-missing"), EdgeKind::Association));
        let text = emit(&builder.build());
        assert!(!text.contains("..>"));
        assert!(text.ends_with("@enduml\n"));
    }
}
