use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarvestError {
    #[error("failed to read input file {0}")]
    InputRead(PathBuf),

    #[error("failed to write output file {0}")]
    OutputWrite(PathBuf),

    #[error("entrez request failed: {0}")]
    EntrezHttp(String),

    #[error("entrez returned status {status}: {message}")]
    EntrezStatus { status: u16, message: String },

    #[error("failed to parse esearch response: {0}")]
    SearchParse(String),

    #[error("malformed run info table: {0}")]
    RunInfoParse(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
