//! Append-only CSV persistence, one resource per query string.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tokio::sync::Mutex;

use shelfscan_core::{ProductRecord, FIELD_NAMES};

use crate::error::StoreError;

/// Per-query CSV store.
///
/// All appends go through one async mutex, so concurrent page tasks can
/// never interleave partial rows or double-write the header of a fresh
/// file: the file-empty check and the write it guards happen under the
/// same lock.
pub struct CsvStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the tabular resource backing `query`.
    #[must_use]
    pub fn path_for(&self, query: &str) -> PathBuf {
        self.dir.join(format!("{query}.csv"))
    }

    /// Appends one record to the per-query resource.
    ///
    /// Each call is a self-contained open/write/close. The header row (field
    /// names in [`FIELD_NAMES`] order) is written first iff the file does not
    /// exist yet or is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Csv`] when the underlying
    /// write fails.
    pub async fn append(&self, query: &str, record: &ProductRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let path = self.path_for(query);

        let needs_header = match std::fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer
                .write_record(FIELD_NAMES)
                .map_err(|source| StoreError::Csv {
                    path: path.clone(),
                    source,
                })?;
        }
        writer
            .write_record(record.to_row())
            .map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?;
        writer.flush().map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(query, path = %path.display(), "appended record");
        Ok(())
    }

    /// Reads every persisted record for `query` back, in file order.
    ///
    /// A missing resource is an empty result set, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Csv`] for unreadable rows and
    /// [`StoreError::InvalidRow`] when a row has the wrong column count.
    pub fn read_all(&self, query: &str) -> Result<Vec<ProductRecord>, StoreError> {
        let path = self.path_for(query);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?;
            if row.len() != FIELD_NAMES.len() {
                return Err(StoreError::InvalidRow {
                    path: path.clone(),
                    line: row.position().map_or(0, csv::Position::line),
                    expected: FIELD_NAMES.len(),
                    got: row.len(),
                });
            }
            let fields: [&str; 9] = std::array::from_fn(|i| row.get(i).unwrap_or_default());
            records.push(ProductRecord::from_row(fields));
        }
        tracing::debug!(query, records = records.len(), "read records back");
        Ok(records)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
