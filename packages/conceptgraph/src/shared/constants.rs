//! Centralized constants
//!
//! Column names, default file names and environment variable names live here
//! so that the loader, the config layer and the tests agree on them.

/// Concepts file (`concepts.csv`)
pub mod concepts {
    pub const FILE_NAME: &str = "concepts.csv";

    pub const NODE_ID: &str = "node_id";
    pub const NODE_NAME: &str = "node_name";
    /// Capitalized in the source spreadsheets; matching is case-sensitive.
    pub const COMPLEXITY: &str = "Complexity";

    pub const COLUMNS: [&str; 3] = [NODE_ID, NODE_NAME, COMPLEXITY];
}

/// Connections file (`connections.csv`)
pub mod connections {
    pub const FILE_NAME: &str = "connections.csv";

    pub const ID: &str = "ID";
    pub const CONNECTION_TYPE: &str = "connection_type";
    pub const NODE_ID1: &str = "node_id1";
    pub const NODE_ID2: &str = "node_id2";
    pub const NODE_ID3: &str = "node_id3";

    pub const ENDPOINTS: [&str; 3] = [NODE_ID1, NODE_ID2, NODE_ID3];
    pub const COLUMNS: [&str; 5] = [ID, CONNECTION_TYPE, NODE_ID1, NODE_ID2, NODE_ID3];
}

/// Output defaults
pub mod output {
    pub const FILE_NAME: &str = "knowledge_graph.json";

    /// Number of nodes listed in the "most connected" statistic
    pub const TOP_NODES: usize = 5;
}

/// Directory defaults (relative to the working directory)
pub mod dirs {
    pub const DATA_DIR: &str = "data";
    pub const OUTPUT_DIR: &str = "output";
}

/// Environment variables read by `GraphConfig::apply_env`
pub mod env {
    pub const DATA_DIR: &str = "CONCEPTGRAPH_DATA_DIR";
    pub const OUTPUT_DIR: &str = "CONCEPTGRAPH_OUTPUT_DIR";
    pub const FORMAT: &str = "CONCEPTGRAPH_FORMAT";
}

/// Edge type followed when tracing containment ancestry
pub const CONTAINMENT_EDGE_TYPE: &str = "contains";
