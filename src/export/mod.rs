// src/export/mod.rs

mod csv;
mod fs_utils;
mod json;

use crate::errors::AppResult;
use crate::models::record::Record;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub use fs_utils::ensure_writable;

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, count: usize, path: &Path) {
    success(format!(
        "{label} export completed: {count} record(s) → {}",
        path.display()
    ));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write `records` to `path`. Returns the number of records written.
///
/// The caller is responsible for the overwrite check ([`ensure_writable`]).
pub fn export_records<R: Record>(
    records: &[R],
    format: ExportFormat,
    path: &Path,
) -> AppResult<usize> {
    match format {
        ExportFormat::Csv => csv::write_csv(path, records)?,
        ExportFormat::Json => json::write_json(path, records)?,
    }
    notify_export_success(format.as_str(), records.len(), path);
    Ok(records.len())
}
