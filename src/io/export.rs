//! Write cleaned tables to CSV.
//!
//! Conventions: one header row, no index column, missing numbers as empty cells.

use std::fs::{create_dir_all, File};
use std::path::Path;

use serde::Serialize;

use crate::error::{AppError, ErrorKind};

/// Write `header` then one row per record, creating parent directories as needed.
pub fn write_records<R: Serialize>(path: &Path, header: &[&str], records: &[R]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|e| {
            AppError::new(ErrorKind::Io, format!("Failed to create '{}': {e}", parent.display()))
        })?;
    }

    let file = File::create(path)
        .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to create CSV '{}': {e}", path.display())))?;

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

    writer
        .write_record(header)
        .map_err(|e| AppError::new(ErrorKind::Csv, format!("Failed to write CSV header: {e}")))?;

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| AppError::new(ErrorKind::Csv, format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(ErrorKind::Io, format!("Failed to flush CSV '{}': {e}", path.display())))?;

    Ok(())
}
