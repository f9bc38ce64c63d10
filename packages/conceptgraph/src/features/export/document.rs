//! Interchange document
//!
//! ```text
//! {
//!   "nodes": [ { "id": "A", "name": "Alpha", "complexity": 1 },
//!              { "id": "C1", "type": "trio", "source_connection_id": "C1" } ],
//!   "edges": [ { "source": "A", "target": "C1", "type": "trio" } ]
//! }
//! ```
//!
//! Nodes are listed in creation order (concepts, then hubs in connection
//! order), edges in creation order.

use serde::{Deserialize, Serialize};

use crate::errors::{ConceptGraphError, Result};
use crate::features::graph_builder::{ConceptGraph, GraphNode};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExportEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<ExportEdge>,
}

impl GraphDocument {
    pub fn from_graph(graph: &ConceptGraph) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            edges: graph
                .edges()
                .map(|e| ExportEdge {
                    source: e.source.id.clone(),
                    target: e.target.id.clone(),
                    edge_type: e.edge_type().to_string(),
                })
                .collect(),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

impl From<&ConceptGraph> for GraphDocument {
    fn from(graph: &ConceptGraph) -> Self {
        GraphDocument::from_graph(graph)
    }
}

impl ConceptGraph {
    /// Rebuild a queryable graph from an exported document.
    ///
    /// Fails with `Document` on a repeated node id or an edge whose endpoint
    /// is not listed in `nodes`.
    pub fn from_document(doc: &GraphDocument) -> Result<Self> {
        let mut graph = ConceptGraph::new();

        for node in &doc.nodes {
            if graph.insert_node(node.clone()).is_none() {
                return Err(ConceptGraphError::document(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
        }

        for (i, edge) in doc.edges.iter().enumerate() {
            let lookup = |id: &str| {
                graph.index_of(id).ok_or_else(|| {
                    ConceptGraphError::document(format!("edge #{i} references unknown node '{id}'"))
                })
            };
            let source = lookup(&edge.source)?;
            let target = lookup(&edge.target)?;
            graph.insert_edge(source, target, edge.edge_type.as_str(), None);
        }

        Ok(graph)
    }
}
