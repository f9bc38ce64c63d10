// Row Loader Domain Models

use std::sync::Arc;

use crate::errors::{ConceptGraphError, Result};
use crate::shared::constants::{concepts, connections};
use crate::shared::RowLocation;

// ============================================================
// Raw Record
// ============================================================

/// One data row: a mapping from column name to raw string value.
///
/// The header is shared between all records of a file. Blank fields are
/// kept as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub at: RowLocation,
    columns: Arc<[String]>,
    values: Vec<String>,
}

impl RawRecord {
    /// `values` must have one entry per column
    pub fn new(at: RowLocation, columns: Arc<[String]>, values: Vec<String>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self {
            at,
            columns,
            values,
        }
    }

    /// Raw value of `column`, `None` if the file has no such column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i].as_str())
    }

    /// (column, value) pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, column: &str) -> Result<&str> {
        self.get(column).ok_or_else(|| {
            ConceptGraphError::malformed_row(self.at.clone(), format!("missing column '{column}'"))
        })
    }
}

// ============================================================
// Typed Views
// ============================================================

/// Row of `concepts.csv`
///
/// `complexity` stays a raw string; the graph builder parses it so that
/// the error names the node it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptRecord {
    pub at: RowLocation,
    pub id: String,
    pub name: String,
    pub complexity: String,
}

impl ConceptRecord {
    pub fn from_raw(raw: &RawRecord) -> Result<Self> {
        Ok(Self {
            at: raw.at.clone(),
            id: raw.require(concepts::NODE_ID)?.trim().to_string(),
            name: raw.require(concepts::NODE_NAME)?.to_string(),
            complexity: raw.require(concepts::COMPLEXITY)?.to_string(),
        })
    }
}

/// Row of `connections.csv`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub at: RowLocation,
    pub id: String,
    pub connection_type: String,
    /// `node_id1..3`, trimmed; empty string = absent
    pub endpoints: [String; 3],
}

impl ConnectionRecord {
    pub fn from_raw(raw: &RawRecord) -> Result<Self> {
        let [e1, e2, e3] = connections::ENDPOINTS;
        Ok(Self {
            at: raw.at.clone(),
            id: raw.require(connections::ID)?.trim().to_string(),
            connection_type: raw.require(connections::CONNECTION_TYPE)?.trim().to_string(),
            endpoints: [
                raw.require(e1)?.trim().to_string(),
                raw.require(e2)?.trim().to_string(),
                raw.require(e3)?.trim().to_string(),
            ],
        })
    }

    /// Number of non-empty endpoint fields
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.iter().filter(|e| !e.is_empty()).count()
    }
}
