// Graph Builder - Records to Concept Graph
//
// Converts concept + connection records → ConceptGraph:
//
// ## Phases
// 1. Concept rows → entity nodes (all of them, before any connection)
// 2. Connection rows → ConnectionShape (DirectEdge | ReifiedHub)
// 3. Shapes → edges, plus one hub node per three-party connection
//
// ## Architecture
// - Domain: ConceptGraph (petgraph DiGraph + id index), GraphNode, GraphEdge,
//   ConnectionShape
// - Infrastructure: GraphBuilder

pub mod domain;
pub mod infrastructure;

pub use domain::{
    ConceptGraph, ConnectionShape, EdgeKind, EdgeView, GraphEdge, GraphNode, NodeData, NodeKind,
};
pub use infrastructure::GraphBuilder;
