//! Graph statistics and per-node reports

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::graph_query::GraphQuery;
use crate::features::graph_builder::{ConceptGraph, EdgeKind, EdgeView, NodeKind};

// ═══════════════════════════════════════════════════════════════════════════
// Statistics
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub degree: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub concept_nodes: usize,
    pub reified_nodes: usize,
    pub total_edges: usize,
    pub direct_edges: usize,
    pub hub_edges: usize,
    /// Highest degree first, ties broken by id
    pub top_nodes: Vec<RankedNode>,
}

impl GraphStats {
    pub fn collect(graph: &ConceptGraph, top_n: usize) -> Self {
        let concept_nodes = graph.nodes().filter(|n| n.is_concept()).count();
        let direct_edges = graph
            .edges()
            .filter(|e| e.kind() == EdgeKind::Direct)
            .count();

        let mut ranked: Vec<RankedNode> = graph
            .nodes()
            .map(|n| RankedNode {
                id: n.id.clone(),
                label: n.label().to_string(),
                kind: n.kind(),
                degree: graph.degree(&n.id),
            })
            .collect();
        ranked.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.id.cmp(&b.id)));
        ranked.truncate(top_n);

        Self {
            total_nodes: graph.node_count(),
            concept_nodes,
            reified_nodes: graph.node_count() - concept_nodes,
            total_edges: graph.edge_count(),
            direct_edges,
            hub_edges: graph.edge_count() - direct_edges,
            top_nodes: ranked,
        }
    }
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes: {}", self.total_nodes)?;
        writeln!(f, "  concepts:             {}", self.concept_nodes)?;
        writeln!(f, "  reified connections:  {}", self.reified_nodes)?;
        writeln!(f, "Edges: {}", self.total_edges)?;
        writeln!(f, "  direct:               {}", self.direct_edges)?;
        writeln!(f, "  hub:                  {}", self.hub_edges)?;
        if !self.top_nodes.is_empty() {
            writeln!(f, "Most connected:")?;
            for node in &self.top_nodes {
                writeln!(
                    f,
                    "  {} ({}, {}): degree {}",
                    node.id,
                    node.label,
                    node.kind.as_str(),
                    node.degree
                )?;
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Ancestry
// ═══════════════════════════════════════════════════════════════════════════

/// Walk incoming direct edges of `edge_type` from `id` towards a root.
///
/// At each step the earliest-created matching edge whose source is not
/// already on the path is followed. The walk stops when no such edge is
/// left. The path starts with `id`; it is empty if `id` is unknown.
pub fn trace_ancestry(graph: &ConceptGraph, id: &str, edge_type: &str) -> Vec<String> {
    if !graph.contains(id) {
        return Vec::new();
    }

    let mut path = vec![id.to_string()];
    let mut seen: HashSet<String> = HashSet::from([id.to_string()]);
    let mut current = id.to_string();

    loop {
        let parent = graph
            .incoming(&current)
            .into_iter()
            .filter(|e| e.kind() == EdgeKind::Direct && e.edge_type() == edge_type)
            .map(|e| e.source.id.as_str())
            .find(|source| !seen.contains(*source))
            .map(str::to_string);

        let Some(p) = parent else {
            break;
        };
        seen.insert(p.clone());
        path.push(p.clone());
        current = p;
    }
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// Node Report
// ═══════════════════════════════════════════════════════════════════════════

/// One direct edge as seen from the reported node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub edge_type: String,
    /// The node on the other end
    pub node: String,
    pub connection_id: Option<String>,
}

impl Link {
    fn outgoing(edge: &EdgeView<'_>) -> Self {
        Self {
            edge_type: edge.edge_type().to_string(),
            node: edge.target.id.clone(),
            connection_id: edge.connection_id().map(str::to_string),
        }
    }

    fn incoming(edge: &EdgeView<'_>) -> Self {
        Self {
            edge_type: edge.edge_type().to_string(),
            node: edge.source.id.clone(),
            connection_id: edge.connection_id().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    pub id: String,
    pub kind: NodeKind,
    pub attributes: Map<String, Value>,
    /// Path along the containment type, starting at this node
    pub ancestry: Vec<String>,
    pub outgoing: Vec<Link>,
    pub incoming: Vec<Link>,
    /// Concepts only: other members of shared hubs, by hub type
    pub related: BTreeMap<String, Vec<String>>,
    /// Hubs only: participating concepts in column order
    pub members: Vec<String>,
}

/// Report on node `id`, or `None` if the graph has no such node
pub fn explore(graph: &ConceptGraph, id: &str, containment_type: &str) -> Option<NodeReport> {
    let node = graph.node(id)?;

    let outgoing = graph
        .outgoing(id)
        .iter()
        .filter(|e| e.kind() == EdgeKind::Direct)
        .map(Link::outgoing)
        .collect();
    let incoming = graph
        .incoming(id)
        .iter()
        .filter(|e| e.kind() == EdgeKind::Direct)
        .map(Link::incoming)
        .collect();

    let (related, members) = match node.kind() {
        NodeKind::Concept => (graph.related_through_hubs(id), Vec::new()),
        NodeKind::ReifiedConnection => (
            BTreeMap::new(),
            graph
                .hub_members(id)
                .into_iter()
                .map(|m| m.id.clone())
                .collect(),
        ),
    };

    Some(NodeReport {
        id: node.id.clone(),
        kind: node.kind(),
        attributes: node.attributes(),
        ancestry: trace_ancestry(graph, id, containment_type),
        outgoing,
        incoming,
        related,
        members,
    })
}

impl fmt::Display for NodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.id, self.kind.as_str())?;
        for (key, value) in &self.attributes {
            match value {
                Value::String(s) => writeln!(f, "  {key}: {s}")?,
                other => writeln!(f, "  {key}: {other}")?,
            }
        }

        if self.ancestry.len() > 1 {
            let mut path = self.ancestry.clone();
            path.reverse();
            writeln!(f, "  path: {}", path.join(" > "))?;
        }

        for link in &self.outgoing {
            writeln!(f, "  -[{}]-> {}", link.edge_type, link.node)?;
        }
        for link in &self.incoming {
            writeln!(f, "  <-[{}]- {}", link.edge_type, link.node)?;
        }
        for (hub_type, ids) in &self.related {
            writeln!(f, "  related ({hub_type}): {}", ids.join(", "))?;
        }
        if !self.members.is_empty() {
            writeln!(f, "  members: {}", self.members.join(", "))?;
        }
        Ok(())
    }
}
