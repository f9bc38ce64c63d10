//! Concept summary document
//!
//! One entry per concept, keyed by id, listing what it links to, what links
//! to it, and which other concepts share a hub with it. Written for readers
//! (human or model) that want to look a concept up instead of walking edges.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::features::graph_builder::{ConceptGraph, EdgeKind, NodeData};

const EXPLANATION: &str = "\
This knowledge graph lists concepts and their relationships.
- links: concepts this one points to, grouped by connection type
- linked_from: concepts pointing to this one, grouped by connection type
- related: concepts sharing a multi-party connection with this one, grouped by connection type
To relate two concepts, check whether one links to the other, then look for them under related.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptSummary {
    pub name: String,
    pub complexity: i64,
    pub links: BTreeMap<String, Vec<String>>,
    pub linked_from: BTreeMap<String, Vec<String>>,
    /// Sorted and deduplicated per type
    pub related: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDocument {
    pub concepts: BTreeMap<String, ConceptSummary>,
    pub explanation: String,
}

impl SummaryDocument {
    pub fn from_graph(graph: &ConceptGraph) -> Self {
        let mut concepts = BTreeMap::new();

        for node in graph.nodes() {
            let NodeData::Concept { name, complexity } = &node.data else {
                continue;
            };

            let mut summary = ConceptSummary {
                name: name.clone(),
                complexity: *complexity,
                links: BTreeMap::new(),
                linked_from: BTreeMap::new(),
                related: graph.related_through_hubs(&node.id),
            };

            for edge in graph.outgoing(&node.id) {
                if edge.kind() == EdgeKind::Direct {
                    summary
                        .links
                        .entry(edge.edge_type().to_string())
                        .or_default()
                        .push(edge.target.id.clone());
                }
            }
            for edge in graph.incoming(&node.id) {
                if edge.kind() == EdgeKind::Direct {
                    summary
                        .linked_from
                        .entry(edge.edge_type().to_string())
                        .or_default()
                        .push(edge.source.id.clone());
                }
            }

            concepts.insert(node.id.clone(), summary);
        }

        Self {
            concepts,
            explanation: EXPLANATION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::graph_builder::GraphBuilder;
    use crate::features::loader::{ConceptRecord, ConnectionRecord};
    use crate::shared::RowLocation;

    fn build(concepts: &[&str], connections: &[(&str, &str, [&str; 3])]) -> ConceptGraph {
        let at = RowLocation::new("test.csv", 2);
        let concepts: Vec<ConceptRecord> = concepts
            .iter()
            .map(|id| ConceptRecord {
                at: at.clone(),
                id: id.to_string(),
                name: id.to_lowercase(),
                complexity: "1".to_string(),
            })
            .collect();
        let connections: Vec<ConnectionRecord> = connections
            .iter()
            .map(|(id, kind, endpoints)| ConnectionRecord {
                at: at.clone(),
                id: id.to_string(),
                connection_type: kind.to_string(),
                endpoints: endpoints.map(str::to_string),
            })
            .collect();
        GraphBuilder::new().build(&concepts, &connections).unwrap()
    }

    #[test]
    fn test_links_and_linked_from() {
        let graph = build(
            &["A", "B", "C"],
            &[("C1", "contains", ["A", "B", ""]), ("C2", "contains", ["A", "C", ""])],
        );
        let doc = SummaryDocument::from_graph(&graph);

        assert_eq!(doc.concepts["A"].links["contains"], vec!["B", "C"]);
        assert_eq!(doc.concepts["B"].linked_from["contains"], vec!["A"]);
        assert!(doc.concepts["C"].links.is_empty());
    }

    #[test]
    fn test_related_through_hub() {
        let graph = build(
            &["A", "B", "C", "D"],
            &[("R1", "related", ["A", "B", "C"]), ("R2", "related", ["B", "C", "D"])],
        );
        let doc = SummaryDocument::from_graph(&graph);

        assert_eq!(doc.concepts["A"].related["related"], vec!["B", "C"]);
        // B shares R1 with A, C and R2 with C, D; C appears once
        assert_eq!(doc.concepts["B"].related["related"], vec!["A", "C", "D"]);
        // hubs are not listed as concepts
        assert!(!doc.concepts.contains_key("R1"));
    }

    #[test]
    fn test_explanation_present() {
        let doc = SummaryDocument::from_graph(&ConceptGraph::new());
        assert!(doc.concepts.is_empty());
        assert!(doc.explanation.contains("related"));
    }
}
