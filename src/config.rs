//! Input and output locations for a run.

use crate::error::{AnalyzerError, Result};
use std::path::PathBuf;

/// Ledger read when no input path is given.
pub const DEFAULT_INPUT: &str = "transactions.csv";

/// Artifact written when no output path is given.
pub const DEFAULT_OUTPUT: &str = "transaction_analysis.json";

/// Paths used by one analyzer run, relative to the working directory
/// unless absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl AnalyzerConfig {
    /// Builds a config from positional arguments `[INPUT] [OUTPUT]`,
    /// excluding the program name.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let config = AnalyzerConfig {
            input: args.next().map(PathBuf::from).unwrap_or_else(|| DEFAULT_INPUT.into()),
            output: args.next().map(PathBuf::from).unwrap_or_else(|| DEFAULT_OUTPUT.into()),
        };

        if args.next().is_some() {
            return Err(AnalyzerError::Usage);
        }
        Ok(config)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}
