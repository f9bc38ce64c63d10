//! GraphQuery - structural queries over a built graph
//!
//! Unknown ids are not errors: set-valued queries return an empty set,
//! `degree` returns 0 and `attributes` returns `None`.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use crate::features::graph_builder::ConceptGraph;

// ═══════════════════════════════════════════════════════════════════════════
// GraphQuery - Core API
// ═══════════════════════════════════════════════════════════════════════════

pub trait GraphQuery {
    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn contains(&self, id: &str) -> bool;

    /// Node attributes without the id
    fn attributes(&self, id: &str) -> Option<Map<String, Value>>;

    /// Targets of edges leaving `id`
    fn successors(&self, id: &str) -> BTreeSet<&str>;

    /// Sources of edges entering `id`
    fn predecessors(&self, id: &str) -> BTreeSet<&str>;

    /// Successors ∪ predecessors
    fn neighbors(&self, id: &str) -> BTreeSet<&str> {
        let mut all = self.successors(id);
        all.extend(self.predecessors(id));
        all
    }

    /// In-degree + out-degree; parallel edges count separately
    fn degree(&self, id: &str) -> usize;
}

impl GraphQuery for ConceptGraph {
    fn node_count(&self) -> usize {
        ConceptGraph::node_count(self)
    }

    fn edge_count(&self) -> usize {
        ConceptGraph::edge_count(self)
    }

    fn contains(&self, id: &str) -> bool {
        ConceptGraph::contains(self, id)
    }

    fn attributes(&self, id: &str) -> Option<Map<String, Value>> {
        self.node(id).map(|n| n.attributes())
    }

    fn successors(&self, id: &str) -> BTreeSet<&str> {
        self.outgoing(id)
            .into_iter()
            .map(|e| e.target.id.as_str())
            .collect()
    }

    fn predecessors(&self, id: &str) -> BTreeSet<&str> {
        self.incoming(id)
            .into_iter()
            .map(|e| e.source.id.as_str())
            .collect()
    }

    fn degree(&self, id: &str) -> usize {
        match self.index_of(id) {
            Some(idx) => {
                let graph = self.graph();
                graph.edges_directed(idx, petgraph::Direction::Outgoing).count()
                    + graph.edges_directed(idx, petgraph::Direction::Incoming).count()
            }
            None => 0,
        }
    }
}
