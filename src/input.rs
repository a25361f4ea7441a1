use std::path::Path;

use crate::domain::BioprojectId;
use crate::error::HarvestError;

/// Reads the BioProject list: one identifier per row, first field wins.
/// Extra fields are ignored and nothing about the identifier format is
/// checked here; duplicates are kept and processed independently.
pub fn read_bioprojects(path: &Path) -> Result<Vec<BioprojectId>, HarvestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|_| HarvestError::InputRead(path.to_path_buf()))?;

    let mut projects = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|_| HarvestError::InputRead(path.to_path_buf()))?;
        if let Some(first) = record.get(0) {
            projects.push(BioprojectId::new(first));
        }
    }
    Ok(projects)
}
