//! Shared models

use std::fmt;
use std::sync::Arc;

/// Position of a row in an input file.
///
/// `line` is 1-based and counts the header, so the first data row of a file
/// is line 2. It is what a user sees when opening the CSV in an editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowLocation {
    pub file: Arc<str>,
    pub line: u64,
}

impl RowLocation {
    pub fn new(file: impl AsRef<str>, line: u64) -> Self {
        Self {
            file: Arc::from(file.as_ref()),
            line,
        }
    }

    /// Location of the header row of `file`
    pub fn header(file: impl AsRef<str>) -> Self {
        Self::new(file, 1)
    }
}

impl fmt::Display for RowLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
