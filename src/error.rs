//! Error types for the ledger analyzer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors that can occur while analyzing a ledger.
///
/// Every variant aborts the run; nothing is written when one is raised
/// before the reporter stage.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Header row lacks one of the positional columns
    #[error("Missing field '{field}' in header")]
    MissingField { field: &'static str },

    /// A row's date or value could not be parsed
    #[error("Malformed record at row {row}: field '{field}' has value {value:?} ({reason})")]
    MalformedRecord {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The JSON artifact could not be created or written
    #[error("Failed to write output to {}: {source}", .path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Too many command line arguments
    #[error("Unexpected arguments. Usage: ledger-analyzer [input.csv] [output.json]")]
    Usage,
}
