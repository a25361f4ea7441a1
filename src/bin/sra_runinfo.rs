use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use sra_runinfo_harvester::app::{App, HarvestResult, ProgressEvent, ProgressSink};
use sra_runinfo_harvester::entrez::EntrezHttpClient;
use sra_runinfo_harvester::error::HarvestError;

#[derive(Parser)]
#[command(name = "sra-runinfo")]
#[command(about = "Download SRA run info for multiple BioProjects and merge it into one CSV")]
#[command(version, author)]
struct Cli {
    /// CSV file with BioProject ids in the first column
    input_file: PathBuf,

    /// Destination for the combined run info CSV
    output_file: PathBuf,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(harvest) = report.downcast_ref::<HarvestError>() {
            return ExitCode::from(map_exit_code(harvest));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &HarvestError) -> u8 {
    match error {
        HarvestError::InputRead(_) | HarvestError::OutputWrite(_) | HarvestError::Filesystem(_) => {
            2
        }
        HarvestError::EntrezHttp(_)
        | HarvestError::EntrezStatus { .. }
        | HarvestError::SearchParse(_) => 3,
        HarvestError::RunInfoParse(_) => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let entrez = EntrezHttpClient::new().into_diagnostic()?;
    let app = App::new(entrez);
    let result = app
        .harvest(&cli.input_file, &cli.output_file, &ConsoleSink)
        .into_diagnostic()?;

    print_summary(&result);
    Ok(())
}

struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn event(&self, event: ProgressEvent) {
        println!("{}", event.message);
    }
}

fn print_summary(result: &HarvestResult) {
    println!(
        "Combined run info for {} BioProject(s) saved to {}",
        result.projects, result.output_path
    );
    println!(
        "  {} run info record(s), {} row(s), {} column(s)",
        result.runs_fetched, result.rows, result.columns
    );
}
