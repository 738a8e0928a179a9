//! Result sink: one atomic CSV write per pipeline run.
//!
//! The header comes from the first output record's column sequence;
//! later records are padded against it by column lookup. The file is
//! serialized to a sibling temp path and renamed into place so a
//! failed run never leaves a half-written table behind.

use std::io;
use std::path::{Path, PathBuf};

use crate::table::{self, Record, SEPARATOR};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no records to export, cannot derive a header")]
    EmptyBatch,

    #[error("failed to write output table: {0}")]
    Io(#[from] io::Error),
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Serialize the whole batch to `path` in one shot. Returns the number
/// of data rows written. Fatal when the batch is empty.
pub fn write_table<P: AsRef<Path>>(records: &[Record], path: P) -> Result<usize, ExportError> {
    let path = path.as_ref();
    let first = records.first().ok_or(ExportError::EmptyBatch)?;
    let headers: Vec<String> = first.column_names().map(str::to_string).collect();

    let mut buf: Vec<u8> = Vec::new();
    table::write_row(&mut buf, &headers, SEPARATOR)?;
    for record in records {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| record.get(h).unwrap_or_default().to_string())
            .collect();
        table::write_row(&mut buf, &cells, SEPARATOR)?;
    }

    let tmp = temp_path(path);
    std::fs::write(&tmp, &buf)?;
    std::fs::rename(&tmp, path)?;
    Ok(records.len())
}
