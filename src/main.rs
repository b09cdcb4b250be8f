//! Ledger Analyzer CLI
//!
//! Reads a `;`-delimited ledger, writes the JSON analysis, and prints a
//! summary to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- [transactions.csv] [transaction_analysis.json]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug`, `info` or `warn` to control logging verbosity

use ledger_analyzer::{analyze_path, AnalyzerConfig, Result};
use std::env;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = AnalyzerConfig::from_args(env::args().skip(1))?;

    let result = analyze_path(&config.input)?;
    result.write_to_path(&config.output)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    result.write_summary(handle)?;

    Ok(())
}
