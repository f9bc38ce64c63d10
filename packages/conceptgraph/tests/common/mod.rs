//! Common test utilities for conceptgraph
//!
//! `Workspace` owns a scratch directory laid out like a real run:
//! `data/` for the two CSV inputs and `output/` for the export.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use conceptgraph::GraphConfig;
use tempfile::TempDir;

pub const CONCEPTS_HEADER: &str = "node_id,node_name,Complexity";
pub const CONNECTIONS_HEADER: &str = "ID,connection_type,node_id1,node_id2,node_id3";

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join("data")).expect("create data dir");
        Self { dir }
    }

    /// Workspace with both files written from `rows` (header added)
    pub fn with_rows(concepts: &[&str], connections: &[&str]) -> Self {
        let ws = Self::new();
        ws.write_concepts(concepts);
        ws.write_connections(connections);
        ws
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("output")
    }

    pub fn write_concepts(&self, rows: &[&str]) {
        self.write_raw("concepts.csv", &csv_body(CONCEPTS_HEADER, rows));
    }

    pub fn write_connections(&self, rows: &[&str]) {
        self.write_raw("connections.csv", &csv_body(CONNECTIONS_HEADER, rows));
    }

    /// Write `content` verbatim to `data/<name>`
    pub fn write_raw(&self, name: &str, content: &str) {
        fs::write(self.data_dir().join(name), content).expect("write input file");
    }

    pub fn config(&self) -> GraphConfig {
        GraphConfig {
            data_dir: self.data_dir(),
            output_dir: self.output_dir(),
            ..GraphConfig::default()
        }
    }
}

fn csv_body(header: &str, rows: &[&str]) -> String {
    let mut body = String::from(header);
    body.push('\n');
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    body
}
