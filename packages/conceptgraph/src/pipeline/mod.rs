//! Pipeline Orchestration
//!
//! load concepts → load connections → build → export
//!
//! Each stage runs to completion before the next starts, and the output file
//! is only touched by the last one, so any error leaves the output directory
//! as it was.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};

use crate::api::GraphStats;
use crate::config::{ExportFormat, GraphConfig};
use crate::errors::Result;
use crate::features::export::{write_json, GraphDocument, SummaryDocument};
use crate::features::graph_builder::{ConceptGraph, GraphBuilder};
use crate::features::loader::{load_concepts, load_connections, ConceptRecord, ConnectionRecord};
use crate::shared::constants::output;

/// Result of a successful `Pipeline::run`
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub output_path: PathBuf,
    pub stats: GraphStats,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: GraphConfig,
}

impl Pipeline {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Read both input files
    pub fn load(&self) -> Result<(Vec<ConceptRecord>, Vec<ConnectionRecord>)> {
        let start = Instant::now();
        let concepts = load_concepts(&self.config.concepts_path())?;
        let connections = load_connections(&self.config.connections_path())?;
        info!(
            concepts = concepts.len(),
            connections = connections.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded input"
        );
        Ok((concepts, connections))
    }

    /// Load and build, without exporting
    pub fn build(&self) -> Result<ConceptGraph> {
        let (concepts, connections) = self.load()?;
        let start = Instant::now();
        let graph = GraphBuilder::new().build(&concepts, &connections)?;
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "build stage done");
        Ok(graph)
    }

    /// Write `graph` in the configured format; returns the output path
    pub fn export(&self, graph: &ConceptGraph) -> Result<PathBuf> {
        let path = self.config.output_path();
        match self.config.format {
            ExportFormat::Graph => {
                write_json(&GraphDocument::from_graph(graph), &path, self.config.pretty)?
            }
            ExportFormat::Summary => {
                write_json(&SummaryDocument::from_graph(graph), &path, self.config.pretty)?
            }
        }
        info!(
            path = %path.display(),
            format = %self.config.format,
            "graph exported"
        );
        Ok(path)
    }

    pub fn run(&self) -> Result<PipelineOutcome> {
        let start = Instant::now();
        let graph = self.build()?;
        let stats = GraphStats::collect(&graph, output::TOP_NODES);
        let output_path = self.export(&graph)?;
        info!(
            nodes = stats.total_nodes,
            edges = stats.total_edges,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "pipeline finished"
        );
        Ok(PipelineOutcome { output_path, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> GraphConfig {
        GraphConfig {
            data_dir: dir.join("data"),
            output_dir: dir.join("out"),
            ..GraphConfig::default()
        }
    }

    fn write_inputs(data: &std::path::Path, concepts: &str, connections: &str) {
        fs::create_dir_all(data).unwrap();
        fs::write(data.join("concepts.csv"), concepts).unwrap();
        fs::write(data.join("connections.csv"), connections).unwrap();
    }

    #[test]
    fn test_run_writes_document() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        write_inputs(
            &config.data_dir,
            "node_id,node_name,Complexity\nA,Alpha,1\nB,Beta,2\n",
            "ID,connection_type,node_id1,node_id2,node_id3\nC1,contains,A,B,\n",
        );

        let outcome = Pipeline::new(config.clone()).run().unwrap();

        assert_eq!(outcome.output_path, config.output_path());
        assert_eq!(outcome.stats.total_nodes, 2);
        assert_eq!(outcome.stats.total_edges, 1);
        assert!(outcome.output_path.exists());
    }

    #[test]
    fn test_missing_connections_file() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::create_dir_all(&config.data_dir).unwrap();
        fs::write(
            config.data_dir.join("concepts.csv"),
            "node_id,node_name,Complexity\nA,Alpha,1\n",
        )
        .unwrap();

        let err = Pipeline::new(config.clone()).run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingFile);
        assert!(!config.output_dir.exists());
    }
}
