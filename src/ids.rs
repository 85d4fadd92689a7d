use std::path::Path;

use log::{debug, info};

use crate::BenchError;

/// The identifiers every dataset is cut from, in file order.
///
/// Loaded once and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct IdentifierSet {
    ids: Vec<i64>,
}

impl IdentifierSet {
    pub fn from_vec(ids: Vec<i64>) -> Self {
        IdentifierSet { ids }
    }

    /// Read the integer column `column` from the CSV file at `path`.
    pub fn load(path: &Path, column: &str) -> Result<Self, BenchError> {
        let load_err = |source| BenchError::Load {
            path: path.to_owned(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(load_err)?;

        let headers = reader.headers().map_err(load_err)?;
        debug!("Columns of {}: {:?}", path.display(), headers);
        let idx = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| BenchError::MissingColumn {
                path: path.to_owned(),
                column: column.to_string(),
            })?;

        let mut ids = vec![];
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(load_err)?;
            // Row 1 is the header.
            let row = i + 2;
            let cell = record.get(idx).unwrap_or("").trim();
            let id = cell.parse::<i64>().map_err(|_| BenchError::InvalidId {
                path: path.to_owned(),
                row,
                value: cell.to_string(),
            })?;
            ids.push(id);
        }
        info!("Loaded {} identifiers from {}", ids.len(), path.display());
        Ok(IdentifierSet { ids })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.ids
    }

    /// The first `size` identifiers, or all of them if there are fewer.
    pub fn prefix(&self, size: usize) -> &[i64] {
        &self.ids[..size.min(self.ids.len())]
    }
}
