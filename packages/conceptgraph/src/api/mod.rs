//! Read-only Inspection API
//!
//! Everything here borrows a built `ConceptGraph` and never mutates it.

pub mod graph_query;
pub mod report;

pub use graph_query::GraphQuery;
pub use report::{explore, trace_ancestry, GraphStats, Link, NodeReport, RankedNode};
