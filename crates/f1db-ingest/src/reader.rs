//! Source reader
//!
//! Reads a delimited flat file (header row required) into an in-memory table
//! of named columns and raw textual cells. No typing happens here; cells stay
//! exactly as they appear in the file and are coerced later, per column, by
//! the projector.

use std::path::Path;

use crate::error::{IngestError, Result};

/// An in-memory source table: header names plus raw rows
#[derive(Debug, Clone)]
pub struct SourceTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Build a table from headers and rows (used by tests and the reader).
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (excluding the header).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Read a CSV file into a [`SourceTable`].
///
/// The first record is taken as the header row. A missing file or malformed
/// CSV aborts the run.
pub fn read_table(path: &Path) -> Result<SourceTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| map_csv_error(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| map_csv_error(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| map_csv_error(path, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(SourceTable::new(headers, rows))
}

fn map_csv_error(path: &Path, error: csv::Error) -> IngestError {
    if error.is_io_error() {
        match error.into_kind() {
            csv::ErrorKind::Io(source) => IngestError::Io {
                path: path.to_path_buf(),
                source,
            },
            // unreachable: is_io_error() held above
            _ => IngestError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other("unknown I/O error"),
            },
        }
    } else {
        IngestError::Csv {
            path: path.to_path_buf(),
            source: error,
        }
    }
}
