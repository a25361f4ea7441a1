use std::path::Path;

use serde::Serialize;

use crate::entrez::EntrezClient;
use crate::error::HarvestError;
use crate::input::read_bioprojects;
use crate::output::write_combined;
use crate::table::{UnifiedTable, parse_run_info};

#[derive(Debug, Clone, Serialize)]
pub struct HarvestResult {
    pub projects: usize,
    pub runs_fetched: usize,
    pub rows: usize,
    pub columns: usize,
    pub output_path: String,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

/// Sink for callers that do not want progress output.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn event(&self, _event: ProgressEvent) {}
}

#[derive(Clone)]
pub struct App<E: EntrezClient> {
    entrez: E,
}

impl<E: EntrezClient> App<E> {
    pub fn new(entrez: E) -> Self {
        Self { entrez }
    }

    /// Runs the whole pipeline: read the BioProject list, fetch and parse
    /// run info per project in input order, unify, write the combined CSV.
    /// The accumulator lives here; the output file is only written once
    /// every project has succeeded.
    pub fn harvest(
        &self,
        input: &Path,
        output: &Path,
        sink: &dyn ProgressSink,
    ) -> Result<HarvestResult, HarvestError> {
        let projects = read_bioprojects(input)?;

        let mut table = UnifiedTable::default();
        let mut runs_fetched = 0usize;
        for project in &projects {
            sink.event(ProgressEvent {
                message: format!("processing BioProject {project}"),
            });

            let record_ids = self.entrez.search_runs(project)?;
            tracing::debug!(project = %project, records = record_ids.len(), "search complete");

            let mut blocks = Vec::with_capacity(record_ids.len());
            for id in &record_ids {
                blocks.push(self.entrez.fetch_run_info(id)?);
            }
            runs_fetched += blocks.len();

            let batch = parse_run_info(&blocks)?;
            table.absorb(batch);
        }

        write_combined(output, &table)?;

        Ok(HarvestResult {
            projects: projects.len(),
            runs_fetched,
            rows: table.rows().len(),
            columns: table.headers().len(),
            output_path: output.display().to_string(),
        })
    }
}
