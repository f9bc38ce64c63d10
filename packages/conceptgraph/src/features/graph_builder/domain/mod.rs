// Graph Builder Domain Models
//
// The graph is a petgraph DiGraph. Nodes are never removed, so node and edge
// indices follow creation order and iteration over them is the export order.

use std::collections::BTreeMap;

use ahash::AHashMap;
use petgraph::graph::{DiGraph, EdgeIndex, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ConceptGraphError, Result};
use crate::features::loader::ConnectionRecord;

// ============================================================
// Graph Node
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// One row of the concepts file
    Concept,
    /// Hub standing in for a three-party connection
    ReifiedConnection,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Concept => "concept",
            NodeKind::ReifiedConnection => "reified_connection",
        }
    }
}

/// Node attributes.
///
/// Serialized untagged so an exported node reads `{id, name, complexity}` or
/// `{id, type, source_connection_id}`. The two field sets are disjoint, which
/// is what lets deserialization pick the right variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeData {
    Concept {
        name: String,
        complexity: i64,
    },
    Reified {
        #[serde(rename = "type")]
        connection_type: String,
        source_connection_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(flatten)]
    pub data: NodeData,
}

impl GraphNode {
    pub fn concept(id: impl Into<String>, name: impl Into<String>, complexity: i64) -> Self {
        Self {
            id: id.into(),
            data: NodeData::Concept {
                name: name.into(),
                complexity,
            },
        }
    }

    /// Hub node for connection `id`; the node id is the connection id
    pub fn reified(id: impl Into<String>, connection_type: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            data: NodeData::Reified {
                connection_type: connection_type.into(),
                source_connection_id: id.clone(),
            },
            id,
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Concept { .. } => NodeKind::Concept,
            NodeData::Reified { .. } => NodeKind::ReifiedConnection,
        }
    }

    #[inline]
    pub fn is_concept(&self) -> bool {
        self.kind() == NodeKind::Concept
    }

    #[inline]
    pub fn is_reified(&self) -> bool {
        self.kind() == NodeKind::ReifiedConnection
    }

    /// Human-readable label: concept name, or connection type for hubs
    pub fn label(&self) -> &str {
        match &self.data {
            NodeData::Concept { name, .. } => name,
            NodeData::Reified {
                connection_type, ..
            } => connection_type,
        }
    }

    /// Attribute mapping, without the id
    pub fn attributes(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        match &self.data {
            NodeData::Concept { name, complexity } => {
                attrs.insert("name".to_string(), Value::from(name.as_str()));
                attrs.insert("complexity".to_string(), Value::from(*complexity));
            }
            NodeData::Reified {
                connection_type,
                source_connection_id,
            } => {
                attrs.insert("type".to_string(), Value::from(connection_type.as_str()));
                attrs.insert(
                    "source_connection_id".to_string(),
                    Value::from(source_connection_id.as_str()),
                );
            }
        }
        attrs
    }
}

// ============================================================
// Graph Edge
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Two-party connection, concept → concept
    Direct,
    /// Edge into or out of a reified hub
    Hub,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    /// The connection's `connection_type`
    pub edge_type: String,
    pub kind: EdgeKind,
    /// `ID` of the connection row that produced this edge; `None` when the
    /// graph was rebuilt from an exported document
    pub connection_id: Option<String>,
}

/// Borrowed edge with resolved endpoints
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub source: &'a GraphNode,
    pub target: &'a GraphNode,
    pub edge: &'a GraphEdge,
}

impl<'a> EdgeView<'a> {
    #[inline]
    pub fn edge_type(&self) -> &'a str {
        &self.edge.edge_type
    }

    #[inline]
    pub fn kind(&self) -> EdgeKind {
        self.edge.kind
    }

    #[inline]
    pub fn connection_id(&self) -> Option<&'a str> {
        self.edge.connection_id.as_deref()
    }
}

// ============================================================
// Connection Shape
// ============================================================

/// What a connection row turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionShape {
    /// `node_id1 → node_id2`
    DirectEdge { source: String, target: String },
    /// `node_id1 → hub`, `hub → node_id2`, `hub → node_id3`
    ReifiedHub { hub: String, members: [String; 3] },
}

impl ConnectionShape {
    /// Classify a connection by its non-empty endpoints.
    ///
    /// Only two layouts are accepted: `node_id1, node_id2` set with
    /// `node_id3` empty, or all three set. Anything else, including a hole
    /// before a filled endpoint, is a `MalformedRow`.
    pub fn classify(record: &ConnectionRecord) -> Result<Self> {
        let [first, second, third] = &record.endpoints;
        match (first.is_empty(), second.is_empty(), third.is_empty()) {
            (false, false, true) => Ok(ConnectionShape::DirectEdge {
                source: first.clone(),
                target: second.clone(),
            }),
            (false, false, false) => {
                if record.id.is_empty() {
                    return Err(ConceptGraphError::malformed_row(
                        record.at.clone(),
                        "three-party connection has an empty ID",
                    ));
                }
                Ok(ConnectionShape::ReifiedHub {
                    hub: record.id.clone(),
                    members: record.endpoints.clone(),
                })
            }
            _ => {
                let count = record.endpoint_count();
                let reason = if count < 2 {
                    format!(
                        "connection '{}' needs at least two endpoints, found {}",
                        record.id, count
                    )
                } else {
                    format!(
                        "connection '{}' has node_id3 set but an earlier endpoint empty",
                        record.id
                    )
                };
                Err(ConceptGraphError::malformed_row(record.at.clone(), reason))
            }
        }
    }

    /// Participating entity ids, in column order
    pub fn endpoints(&self) -> Vec<&str> {
        match self {
            ConnectionShape::DirectEdge { source, target } => vec![source.as_str(), target.as_str()],
            ConnectionShape::ReifiedHub { members, .. } => {
                members.iter().map(String::as_str).collect()
            }
        }
    }
}

// ============================================================
// Concept Graph
// ============================================================

/// Labeled directed graph of concepts and reified connections.
///
/// Append-only: the builder inserts, everything else reads.
#[derive(Debug, Clone, Default)]
pub struct ConceptGraph {
    graph: DiGraph<GraphNode, GraphEdge>,
    index: AHashMap<String, NodeIndex>,
}

impl ConceptGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node; `None` (and no change) if the id is taken
    pub(crate) fn insert_node(&mut self, node: GraphNode) -> Option<NodeIndex> {
        if self.index.contains_key(&node.id) {
            return None;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        Some(idx)
    }

    /// Insert an edge; the kind is derived from the endpoints
    pub(crate) fn insert_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        edge_type: impl Into<String>,
        connection_id: Option<&str>,
    ) -> EdgeIndex {
        let kind = if self.graph[source].is_reified() || self.graph[target].is_reified() {
            EdgeKind::Hub
        } else {
            EdgeKind::Direct
        };
        self.graph.add_edge(
            source,
            target,
            GraphEdge {
                edge_type: edge_type.into(),
                kind,
                connection_id: connection_id.map(str::to_string),
            },
        )
    }

    #[inline]
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    #[inline]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges in creation order
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.graph.edge_references().map(move |e| self.view(e))
    }

    /// Edges leaving `id`, in creation order (empty for unknown ids)
    pub fn outgoing(&self, id: &str) -> Vec<EdgeView<'_>> {
        self.directed(id, Direction::Outgoing)
    }

    /// Edges entering `id`, in creation order (empty for unknown ids)
    pub fn incoming(&self, id: &str) -> Vec<EdgeView<'_>> {
        self.directed(id, Direction::Incoming)
    }

    /// Concepts attached to hub `hub_id`, in column order
    /// (`node_id1` first). Empty if `hub_id` is not a hub.
    pub fn hub_members(&self, hub_id: &str) -> Vec<&GraphNode> {
        match self.node(hub_id) {
            Some(hub) if hub.is_reified() => self
                .incoming(hub_id)
                .into_iter()
                .map(|e| e.source)
                .chain(self.outgoing(hub_id).into_iter().map(|e| e.target))
                .filter(|n| n.is_concept())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Other concepts sharing a hub with concept `id`, grouped by hub type,
    /// sorted and deduplicated
    pub fn related_through_hubs(&self, id: &str) -> BTreeMap<String, Vec<String>> {
        let hubs = self
            .outgoing(id)
            .into_iter()
            .map(|e| e.target)
            .chain(self.incoming(id).into_iter().map(|e| e.source))
            .filter(|n| n.is_reified());

        let mut related: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for hub in hubs {
            let others = self
                .hub_members(&hub.id)
                .into_iter()
                .filter(|m| m.id != id)
                .map(|m| m.id.clone());
            related
                .entry(hub.label().to_string())
                .or_default()
                .extend(others);
        }
        for ids in related.values_mut() {
            ids.sort();
            ids.dedup();
        }
        related
    }

    /// Underlying petgraph graph
    pub fn graph(&self) -> &DiGraph<GraphNode, GraphEdge> {
        &self.graph
    }

    fn directed(&self, id: &str, direction: Direction) -> Vec<EdgeView<'_>> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        // petgraph walks adjacency lists newest-first
        let mut edges: Vec<EdgeReference<'_, GraphEdge>> =
            self.graph.edges_directed(idx, direction).collect();
        edges.sort_by_key(|e| e.id());
        edges.into_iter().map(|e| self.view(e)).collect()
    }

    fn view<'a>(&'a self, e: EdgeReference<'a, GraphEdge>) -> EdgeView<'a> {
        EdgeView {
            source: &self.graph[e.source()],
            target: &self.graph[e.target()],
            edge: e.weight(),
        }
    }
}
