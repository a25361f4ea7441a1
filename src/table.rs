use crate::error::HarvestError;

/// Parse result for one BioProject: the column names seen across its
/// run-info blocks (first-seen order, deduplicated) and every data row in
/// block order. Rows stay positionally aligned to their own block's header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunInfoBatch {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parses the raw run-info blocks fetched for one BioProject. Each block is
/// a CSV table whose first record is the header; the rest are data rows kept
/// as strings with no coercion. A block with no records at all is malformed.
pub fn parse_run_info(blocks: &[String]) -> Result<RunInfoBatch, HarvestError> {
    let mut batch = RunInfoBatch::default();
    for block in blocks {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(block.as_bytes());
        let mut records = reader.records();

        let header = records
            .next()
            .ok_or_else(|| {
                HarvestError::RunInfoParse("run info block is missing a header row".to_string())
            })?
            .map_err(|err| HarvestError::RunInfoParse(err.to_string()))?;
        for name in header.iter() {
            if !batch.headers.iter().any(|seen| seen == name) {
                batch.headers.push(name.to_string());
            }
        }

        for record in records {
            let record = record.map_err(|err| HarvestError::RunInfoParse(err.to_string()))?;
            batch.rows.push(record.iter().map(str::to_string).collect());
        }
    }
    Ok(batch)
}

/// Accumulates every BioProject's batch into one table. Column names are
/// unified (unseen names appended in encounter order); data rows are taken
/// as-is and are never re-aligned to the unified column order, matching what
/// downstream consumers of the combined file already expect.
#[derive(Debug, Default, Clone)]
pub struct UnifiedTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl UnifiedTable {
    pub fn absorb(&mut self, batch: RunInfoBatch) {
        for name in batch.headers {
            if !self.headers.iter().any(|seen| seen == &name) {
                self.headers.push(name);
            }
        }
        self.rows.extend(batch.rows);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}
