//! CSV reader
//!
//! UTF-8, comma-delimited, header row required. Header names are trimmed
//! before matching; field values are returned untouched. Fully blank lines
//! are skipped by the csv reader.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::errors::{ConceptGraphError, Result};
use crate::features::loader::domain::{ConceptRecord, ConnectionRecord, RawRecord};
use crate::shared::constants::{concepts, connections};
use crate::shared::RowLocation;

/// Read `path` into records, checking that every `expected` column exists
/// and that every row has as many fields as the header.
///
/// ## Errors
/// - `MissingFile` if `path` does not exist
/// - `MalformedRow` for a missing column (reported on line 1), a field count
///   mismatch, or a row the csv parser rejects
pub fn load_records(path: &Path, expected: &[&str]) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConceptGraphError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => ConceptGraphError::Io(e),
    })?;

    let records = read_records(file, &path.display().to_string(), expected)?;
    debug!(path = %path.display(), rows = records.len(), "loaded csv");
    Ok(records)
}

/// Same as `load_records` over any reader; `file_label` is used in errors.
pub fn read_records<R: Read>(
    reader: R,
    file_label: &str,
    expected: &[&str],
) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns: Arc<[String]> = rdr
        .headers()
        .map_err(|e| csv_error(e, file_label))?
        .iter()
        .map(str::to_string)
        .collect();

    for column in expected {
        if !columns.iter().any(|c| c == column) {
            return Err(ConceptGraphError::malformed_row(
                RowLocation::header(file_label),
                format!("missing column '{column}'"),
            ));
        }
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| csv_error(e, file_label))?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let at = RowLocation::new(file_label, line);

        if row.len() != columns.len() {
            return Err(ConceptGraphError::malformed_row(
                at,
                format!("expected {} fields, found {}", columns.len(), row.len()),
            ));
        }

        let values = row.iter().map(str::to_string).collect();
        records.push(RawRecord::new(at, Arc::clone(&columns), values));
    }

    Ok(records)
}

/// Load and type `concepts.csv`
pub fn load_concepts(path: &Path) -> Result<Vec<ConceptRecord>> {
    load_records(path, &concepts::COLUMNS)?
        .iter()
        .map(ConceptRecord::from_raw)
        .collect()
}

/// Load and type `connections.csv`
pub fn load_connections(path: &Path) -> Result<Vec<ConnectionRecord>> {
    load_records(path, &connections::COLUMNS)?
        .iter()
        .map(ConnectionRecord::from_raw)
        .collect()
}

fn csv_error(err: csv::Error, file_label: &str) -> ConceptGraphError {
    let line = err.position().map(|p| p.line()).unwrap_or(1);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => ConceptGraphError::Io(e),
        _ => ConceptGraphError::malformed_row(RowLocation::new(file_label, line), message),
    }
}
