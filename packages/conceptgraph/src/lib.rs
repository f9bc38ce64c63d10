/*
 * Conceptgraph - CSV to Knowledge Graph
 *
 * Feature-First Layout:
 * - shared/      : Constants and row locations used everywhere
 * - features/    : Vertical slices (loader → graph_builder → export)
 * - api/         : Read-only inspection (GraphQuery, stats, node reports)
 * - pipeline/    : load → build → export orchestration
 * - config/      : Defaults, YAML file, environment overrides
 */

/// Shared constants and models
pub mod shared;

/// Feature modules (loader, graph builder, exporter)
pub mod features;

/// Inspection API
pub mod api;

/// Configuration system
pub mod config;

/// Pipeline orchestration
pub mod pipeline;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use api::{explore, trace_ancestry, GraphQuery, GraphStats, NodeReport};
pub use config::{ConfigOverrides, ExportFormat, GraphConfig};
pub use errors::{ConceptGraphError, ErrorKind, Result};
pub use features::export::{
    read_document, render_prompt, write_json, GraphDocument, SummaryDocument,
};
pub use features::graph_builder::{
    ConceptGraph, ConnectionShape, EdgeKind, GraphBuilder, GraphEdge, GraphNode, NodeData,
    NodeKind,
};
pub use features::loader::{load_records, ConceptRecord, ConnectionRecord, RawRecord};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use shared::RowLocation;
