use std::fs;
use std::path::Path;

use crate::error::HarvestError;
use crate::table::UnifiedTable;

/// Writes the combined run-info CSV: unified header first, then every
/// accumulated row right-padded with empty fields to the header width. Rows
/// longer than the header are written as-is, never truncated.
pub fn write_combined(path: &Path, table: &UnifiedTable) -> Result<(), HarvestError> {
    if table.headers().is_empty() {
        // A run where no project produced records still gets its header
        // line, just a blank one.
        return fs::write(path, "\n").map_err(|_| HarvestError::OutputWrite(path.to_path_buf()));
    }

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|_| HarvestError::OutputWrite(path.to_path_buf()))?;

    writer
        .write_record(table.headers())
        .map_err(|_| HarvestError::OutputWrite(path.to_path_buf()))?;

    let width = table.headers().len();
    for row in table.rows() {
        if row.len() < width {
            let mut padded = row.clone();
            padded.resize(width, String::new());
            writer
                .write_record(&padded)
                .map_err(|_| HarvestError::OutputWrite(path.to_path_buf()))?;
        } else {
            writer
                .write_record(row)
                .map_err(|_| HarvestError::OutputWrite(path.to_path_buf()))?;
        }
    }

    writer
        .flush()
        .map_err(|_| HarvestError::OutputWrite(path.to_path_buf()))
}
