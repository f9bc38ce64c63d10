//! Error types for conceptgraph
//!
//! Every failure is fatal to a run. Each variant carries enough context
//! (file and line, or node id) for the CLI to point the user at the
//! offending record.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::shared::RowLocation;

/// Main error type for conceptgraph operations
#[derive(Debug, Error)]
pub enum ConceptGraphError {
    /// Input file does not exist
    #[error("Missing input file: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Row has the wrong shape (field count, missing column, endpoint layout)
    #[error("Malformed row at {at}: {reason}")]
    MalformedRow { at: RowLocation, reason: String },

    /// Attribute value could not be parsed
    #[error("Invalid attribute '{attribute}' for node '{node_id}' at {at}: {value:?} is not an integer")]
    InvalidAttribute {
        node_id: String,
        attribute: String,
        value: String,
        at: RowLocation,
    },

    /// Node id already present in the graph
    #[error("Duplicate node id '{node_id}' at {at}")]
    DuplicateNode { node_id: String, at: RowLocation },

    /// Connection endpoint does not name an entity node
    #[error("Connection '{connection_id}' at {at} references unknown endpoint '{endpoint}'")]
    UnknownEndpoint {
        connection_id: String,
        endpoint: String,
        at: RowLocation,
    },

    /// Output could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Exported document is internally inconsistent
    #[error("Invalid graph document: {0}")]
    Document(String),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConceptGraphError {
    pub fn malformed_row(at: RowLocation, reason: impl Into<String>) -> Self {
        ConceptGraphError::MalformedRow {
            at,
            reason: reason.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConceptGraphError::Write {
            path: path.into(),
            source,
        }
    }

    pub fn document(msg: impl Into<String>) -> Self {
        ConceptGraphError::Document(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConceptGraphError::MissingFile { .. } => ErrorKind::MissingFile,
            ConceptGraphError::MalformedRow { .. } => ErrorKind::MalformedRow,
            ConceptGraphError::InvalidAttribute { .. } => ErrorKind::InvalidAttribute,
            ConceptGraphError::DuplicateNode { .. } => ErrorKind::DuplicateNode,
            ConceptGraphError::UnknownEndpoint { .. } => ErrorKind::UnknownEndpoint,
            ConceptGraphError::Write { .. } => ErrorKind::Write,
            ConceptGraphError::Document(_) => ErrorKind::Document,
            ConceptGraphError::Config(_) => ErrorKind::Config,
            ConceptGraphError::Io(_) => ErrorKind::Io,
            ConceptGraphError::Json(_) => ErrorKind::Json,
        }
    }
}

/// Stable error tags (used in CLI output and logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingFile,
    MalformedRow,
    InvalidAttribute,
    DuplicateNode,
    UnknownEndpoint,
    Write,
    Document,
    Config,
    Io,
    Json,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingFile => "missing_file",
            ErrorKind::MalformedRow => "malformed_row",
            ErrorKind::InvalidAttribute => "invalid_attribute",
            ErrorKind::DuplicateNode => "duplicate_node",
            ErrorKind::UnknownEndpoint => "unknown_endpoint",
            ErrorKind::Write => "write",
            ErrorKind::Document => "document",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
            ErrorKind::Json => "json",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result type alias for conceptgraph operations
pub type Result<T> = std::result::Result<T, ConceptGraphError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    // ═══════════════════════════════════════════════════════════════════════
    // Display
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_missing_file_names_path() {
        let err = ConceptGraphError::MissingFile {
            path: PathBuf::from("data/concepts.csv"),
        };
        assert_eq!(err.to_string(), "Missing input file: data/concepts.csv");
        assert_eq!(err.kind(), ErrorKind::MissingFile);
    }

    #[test]
    fn test_malformed_row_names_location() {
        let err = ConceptGraphError::malformed_row(
            RowLocation::new("connections.csv", 4),
            "expected 5 fields, found 4",
        );
        let msg = err.to_string();
        assert!(msg.contains("connections.csv:4"));
        assert!(msg.contains("expected 5 fields"));
    }

    #[test]
    fn test_unknown_endpoint_names_connection_and_endpoint() {
        let err = ConceptGraphError::UnknownEndpoint {
            connection_id: "C7".to_string(),
            endpoint: "ZZ".to_string(),
            at: RowLocation::new("connections.csv", 8),
        };
        let msg = err.to_string();
        assert!(msg.contains("'C7'"));
        assert!(msg.contains("'ZZ'"));
        assert_eq!(err.kind().as_str(), "unknown_endpoint");
    }

    #[test]
    fn test_invalid_attribute_quotes_value() {
        let err = ConceptGraphError::InvalidAttribute {
            node_id: "A".to_string(),
            attribute: "Complexity".to_string(),
            value: "high".to_string(),
            at: RowLocation::new("concepts.csv", 2),
        };
        assert!(err.to_string().contains("\"high\" is not an integer"));
    }

    #[test]
    fn test_write_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ConceptGraphError::write("out/graph.json", io_err);

        assert_eq!(err.kind(), ErrorKind::Write);
        assert!(err.to_string().contains("out/graph.json"));
        let source = err.source().unwrap();
        assert!(source.to_string().contains("denied"));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Conversions
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{nope")
            .err()
            .unwrap();
        let err: ConceptGraphError = json_err.into();
        assert_eq!(err.kind(), ErrorKind::Json);
    }

    #[test]
    fn test_result_propagation() {
        fn inner() -> Result<()> {
            Err(ConceptGraphError::document("dangling edge"))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert_eq!(outer().unwrap_err().kind(), ErrorKind::Document);
    }
}
