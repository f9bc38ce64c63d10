//! JSON file output
//!
//! Output is serialized into a temporary file next to the target and renamed
//! into place, so a failed run never leaves a truncated document behind.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::{ConceptGraphError, Result};
use crate::features::export::GraphDocument;

/// Serialize `value` to `path`, creating the parent directory if needed.
///
/// Any failure is reported as `Write` naming `path`.
pub fn write_json<T: Serialize>(value: &T, path: &Path, pretty: bool) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| ConceptGraphError::write(path, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ConceptGraphError::write(path, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let serialized = if pretty {
            serde_json::to_writer_pretty(&mut writer, value)
        } else {
            serde_json::to_writer(&mut writer, value)
        };
        serialized.map_err(|e| ConceptGraphError::write(path, io::Error::from(e)))?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|e| ConceptGraphError::write(path, e))?;
    }

    tmp.persist(path)
        .map_err(|e| ConceptGraphError::write(path, e.error))?;
    debug!(path = %path.display(), "wrote json");
    Ok(())
}

/// Read an exported `{nodes, edges}` document
pub fn read_document(path: &Path) -> Result<GraphDocument> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConceptGraphError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => ConceptGraphError::Io(e),
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
