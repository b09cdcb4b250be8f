//! # Ledger Analyzer
//!
//! Reads a `;`-delimited deposit/withdrawal ledger, computes totals, a
//! running net, and per-month figures, and reports them as a text summary
//! and a JSON document.
//!
//! ## Pipeline
//!
//! - **Loader**: positional columns (date, type, value), comma-decimal values
//! - **Aggregator**: stable sort by date, then a single fold
//! - **Ranker**: months by net descending, ties by ascending month key
//! - **Reporter**: two-decimal summary and pretty JSON artifact
//!
//! Deposits count against the running net and withdrawals count toward it,
//! so `net_result = total_withdrawn - total_deposited`.
//!
//! ## Example
//!
//! ```
//! use ledger_analyzer::analyze_str;
//!
//! let csv = "Date;Tipe;Vaule\n2023-01-05;Deposit;1000,00\n2023-01-20;Withdrawal;50,00\n";
//! let result = analyze_str(csv).unwrap();
//! assert_eq!(result.net_result.to_string(), "-950.00");
//! ```

pub mod aggregate;
pub mod config;
pub mod decimal;
pub mod error;
pub mod loader;
pub mod ranking;
pub mod report;
pub mod stats;
pub mod transaction;

pub use aggregate::{aggregate, Aggregation, MonthlyBucket, MonthlyData};
pub use config::AnalyzerConfig;
pub use decimal::{Money, Ratio};
pub use error::{AnalyzerError, Result};
pub use ranking::{rank_months, MonthRanking};
pub use report::AnalysisResult;
pub use stats::{HistogramBucket, LedgerStatistics, Trend};
pub use transaction::{ParsedTransaction, ProcessedTransaction, TransactionRecord, TxKind};

use std::path::Path;

/// Runs the pipeline over the ledger file at `path`.
pub fn analyze_path<P: AsRef<Path>>(path: P) -> Result<AnalysisResult> {
    let transactions = loader::load_path(path)?;
    Ok(AnalysisResult::from_aggregation(aggregate(transactions)))
}

/// Runs the pipeline over an in-memory ledger.
pub fn analyze_str(contents: &str) -> Result<AnalysisResult> {
    let transactions = loader::load_str(contents)?;
    Ok(AnalysisResult::from_aggregation(aggregate(transactions)))
}
