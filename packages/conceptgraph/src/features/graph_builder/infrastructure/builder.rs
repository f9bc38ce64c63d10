// Graph Builder - Main Entry Point
//
// Concept records + connection records → ConceptGraph.
//
// Every concept node exists before the first connection is looked at, and
// connections may only point at concept nodes: a hub created by an earlier
// row is not a valid endpoint for a later one.

use petgraph::graph::NodeIndex;
use tracing::{debug, info, warn};

use crate::errors::{ConceptGraphError, Result};
use crate::features::graph_builder::domain::{ConceptGraph, ConnectionShape, GraphNode};
use crate::features::loader::{ConceptRecord, ConnectionRecord};
use crate::shared::constants::concepts;

// ============================================================
// Graph Builder
// ============================================================

/// Builds a `ConceptGraph` in a single pass over each record set.
///
/// ## Usage
/// ```text
/// let graph = GraphBuilder::new().build(&concepts, &connections)?;
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the complete graph.
    ///
    /// ## Phases
    /// 1. **Concepts** → one node each (blank ids skipped with a warning)
    /// 2. **Connections** → direct edge, or hub node + three edges
    ///
    /// ## Errors
    /// - `InvalidAttribute` if `Complexity` is not an integer
    /// - `DuplicateNode` for a repeated concept id, or a hub id that is taken
    /// - `MalformedRow` for an unusable endpoint layout
    /// - `UnknownEndpoint` for an endpoint that is not a concept id
    pub fn build(
        &self,
        concepts: &[ConceptRecord],
        connections: &[ConnectionRecord],
    ) -> Result<ConceptGraph> {
        let mut graph = ConceptGraph::new();

        // Phase 1: concept nodes
        let mut skipped = 0usize;
        for record in concepts {
            if record.id.is_empty() {
                warn!(at = %record.at, "skipping concept row with blank node_id");
                skipped += 1;
                continue;
            }
            self.add_concept(&mut graph, record)?;
        }
        let concept_count = graph.node_count();

        // Phase 2: connections
        let mut reified = 0usize;
        for record in connections {
            if self.add_connection(&mut graph, record)? {
                reified += 1;
            }
        }

        info!(
            concepts = concept_count,
            skipped,
            reified,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph built"
        );
        Ok(graph)
    }

    fn add_concept(&self, graph: &mut ConceptGraph, record: &ConceptRecord) -> Result<()> {
        let complexity = record.complexity.trim().parse::<i64>().map_err(|_| {
            ConceptGraphError::InvalidAttribute {
                node_id: record.id.clone(),
                attribute: concepts::COMPLEXITY.to_string(),
                value: record.complexity.clone(),
                at: record.at.clone(),
            }
        })?;

        let node = GraphNode::concept(&record.id, &record.name, complexity);
        graph
            .insert_node(node)
            .ok_or_else(|| ConceptGraphError::DuplicateNode {
                node_id: record.id.clone(),
                at: record.at.clone(),
            })?;
        Ok(())
    }

    /// Returns `true` if a hub node was created
    fn add_connection(&self, graph: &mut ConceptGraph, record: &ConnectionRecord) -> Result<bool> {
        let shape = ConnectionShape::classify(record)?;
        let edge_type = record.connection_type.as_str();
        let connection_id = Some(record.id.as_str());

        // Validate every endpoint before touching the graph
        let endpoints = shape
            .endpoints()
            .into_iter()
            .map(|id| resolve_endpoint(graph, record, id))
            .collect::<Result<Vec<NodeIndex>>>()?;

        match (shape, endpoints.as_slice()) {
            (ConnectionShape::DirectEdge { .. }, &[source, target]) => {
                graph.insert_edge(source, target, edge_type, connection_id);
                debug!(connection = %record.id, edge_type, "direct edge");
                Ok(false)
            }
            (ConnectionShape::ReifiedHub { hub, .. }, &[first, second, third]) => {
                let hub_idx = graph
                    .insert_node(GraphNode::reified(&hub, edge_type))
                    .ok_or_else(|| ConceptGraphError::DuplicateNode {
                        node_id: hub.clone(),
                        at: record.at.clone(),
                    })?;

                graph.insert_edge(first, hub_idx, edge_type, connection_id);
                graph.insert_edge(hub_idx, second, edge_type, connection_id);
                graph.insert_edge(hub_idx, third, edge_type, connection_id);
                debug!(connection = %record.id, edge_type, "reified hub");
                Ok(true)
            }
            (_, resolved) => Err(ConceptGraphError::malformed_row(
                record.at.clone(),
                format!("connection '{}' resolved {} endpoints", record.id, resolved.len()),
            )),
        }
    }
}

/// Index of concept `id`, or `UnknownEndpoint`
fn resolve_endpoint(
    graph: &ConceptGraph,
    record: &ConnectionRecord,
    id: &str,
) -> Result<NodeIndex> {
    match graph.index_of(id) {
        Some(idx) if graph.graph()[idx].is_concept() => Ok(idx),
        _ => Err(ConceptGraphError::UnknownEndpoint {
            connection_id: record.id.clone(),
            endpoint: id.to_string(),
            at: record.at.clone(),
        }),
    }
}

// ============================================================
// Tests
// ============================================================
