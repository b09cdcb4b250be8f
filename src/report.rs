//! Analysis result, console summary, and JSON artifact.

use crate::aggregate::{Aggregation, MonthlyData};
use crate::decimal::Money;
use crate::error::{AnalyzerError, Result};
use crate::ranking::{rank_months, RankedMonth};
use crate::stats::LedgerStatistics;
use crate::transaction::ProcessedTransaction;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Complete view of an analyzed ledger.
///
/// Field order is the order of keys in the JSON artifact. `best_month` and
/// `worst_month` serialize as `[month_key, bucket]` pairs, or `null` when the
/// ledger has no months.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub total_deposited: Money,
    pub total_withdrawn: Money,
    /// `total_withdrawn - total_deposited`
    pub net_result: Money,
    pub transaction_count: usize,
    pub best_month: Option<RankedMonth>,
    pub worst_month: Option<RankedMonth>,
    pub monthly_data: MonthlyData,
    /// Sorted by timestamp ascending.
    pub transactions: Vec<ProcessedTransaction>,
    pub statistics: LedgerStatistics,
}

impl AnalysisResult {
    /// Ranks the months of an aggregation and assembles the final result.
    pub fn from_aggregation(aggregation: Aggregation) -> Self {
        let ranking = rank_months(&aggregation.monthly);
        let statistics = LedgerStatistics::compute(&aggregation);

        AnalysisResult {
            total_deposited: aggregation.total_deposited,
            total_withdrawn: aggregation.total_withdrawn,
            net_result: aggregation.total_withdrawn - aggregation.total_deposited,
            transaction_count: aggregation.transactions.len(),
            best_month: ranking.best().cloned(),
            worst_month: ranking.worst().cloned(),
            monthly_data: aggregation.monthly,
            transactions: aggregation.transactions,
            statistics,
        }
    }

    /// Writes the fixed-format text summary.
    pub fn write_summary<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "Total Deposited: {}", self.total_deposited)?;
        writeln!(writer, "Total Withdrawn: {}", self.total_withdrawn)?;
        writeln!(writer, "Net Result: {}", self.net_result)?;
        writeln!(writer, "Total Transactions: {}", self.transaction_count)?;
        if let Some((month, bucket)) = &self.best_month {
            writeln!(writer, "Best Month: {} ({})", month, bucket.net)?;
        }
        if let Some((month, bucket)) = &self.worst_month {
            writeln!(writer, "Worst Month: {} ({})", month, bucket.net)?;
        }

        let stats = &self.statistics;
        writeln!(writer)?;
        writeln!(
            writer,
            "Deposits: {} (avg {}, max {})",
            stats.deposit_count, stats.avg_deposit, stats.max_deposit
        )?;
        writeln!(
            writer,
            "Withdrawals: {} (avg {}, max {})",
            stats.withdrawal_count, stats.avg_withdrawal, stats.max_withdrawal
        )?;
        writeln!(writer, "ROI: {}%", stats.roi_percent)?;
        writeln!(
            writer,
            "Profitable Months: {}/{} ({}%)",
            stats.profitable_months,
            self.monthly_data.len(),
            stats.win_rate_percent
        )?;
        writeln!(
            writer,
            "Trend: {} ({}%)",
            stats.trend.as_str(),
            stats.trend_percent
        )?;
        if let Some(month) = &stats.most_active_month {
            writeln!(writer, "Most Active Month: {}", month)?;
        }
        if let Some(peak) = &stats.peak {
            writeln!(writer, "Peak Balance: {} on {}", peak.balance, peak.date)?;
        }
        if let Some(valley) = &stats.valley {
            writeln!(writer, "Lowest Balance: {} on {}", valley.balance, valley.date)?;
        }
        Ok(())
    }

    /// Serializes the full result as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Writes the JSON artifact to `path`, replacing any previous content.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let failure = |source: io::Error| AnalyzerError::OutputWriteFailure {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(failure)?;
        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer).map_err(failure)?;
        writer.flush().map_err(failure)?;

        info!("Wrote analysis to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::loader::load_str;

    fn analyze_csv(rows: &str) -> AnalysisResult {
        let csv = format!("Date;Tipe;Vaule\n{}", rows);
        AnalysisResult::from_aggregation(aggregate(load_str(&csv).unwrap()))
    }

    fn summary(result: &AnalysisResult) -> String {
        let mut out = Vec::new();
        result.write_summary(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    const SCENARIO: &str =
        "2023-01-05;Deposit;1000,00\n2023-01-20;Withdrawal;50,00\n2023-02-01;Deposit;500,00\n";

    #[test]
    fn test_summary_format() {
        let text = summary(&analyze_csv(SCENARIO));

        assert!(text.starts_with(
            "Total Deposited: 1500.00\n\
             Total Withdrawn: 50.00\n\
             Net Result: -1450.00\n\
             Total Transactions: 3\n\
             Best Month: 2023-02 (-500.00)\n\
             Worst Month: 2023-01 (-950.00)\n"
        ));
        assert!(text.contains("ROI: -96.67%"));
        assert!(text.contains("Profitable Months: 0/2 (0.00%)"));
        assert!(text.contains("Trend: stable (0.00%)"));
    }

    #[test]
    fn test_summary_rounds_ratio_midpoints_away_from_zero() {
        // net 1 on 800 deposited is exactly 0.125%
        let text = summary(&analyze_csv("2023-01-01;Deposit;800,00\n2023-01-02;Withdrawal;801,00\n"));
        assert!(text.contains("ROI: 0.13%"));

        let text = summary(&analyze_csv("2023-01-01;Deposit;800,00\n2023-01-02;Withdrawal;799,00\n"));
        assert!(text.contains("ROI: -0.13%"));
    }

    #[test]
    fn test_summary_omits_months_when_empty() {
        let text = summary(&analyze_csv(""));

        assert!(text.starts_with("Total Deposited: 0.00\n"));
        assert!(text.contains("Total Transactions: 0\n"));
        assert!(!text.contains("Best Month"));
        assert!(!text.contains("Worst Month"));
    }

    #[test]
    fn test_json_shape() {
        let result = analyze_csv(SCENARIO);
        let mut out = Vec::new();
        result.write_json(&mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["total_deposited"], 1500.0);
        assert_eq!(json["total_withdrawn"], 50.0);
        assert_eq!(json["net_result"], -1450.0);
        assert_eq!(json["transaction_count"], 3);
        assert_eq!(json["best_month"][0], "2023-02");
        assert_eq!(json["best_month"][1]["net"], -500.0);
        assert_eq!(json["worst_month"][0], "2023-01");
        assert_eq!(json["monthly_data"]["2023-01"]["deposit"], 1000.0);
        assert_eq!(json["monthly_data"]["2023-01"]["withdrawal"], 50.0);
        assert_eq!(json["monthly_data"]["2023-01"]["net"], -950.0);
        assert_eq!(json["transactions"].as_array().unwrap().len(), 3);
        assert_eq!(json["transactions"][2]["cumulative_net"], -1450.0);
        assert_eq!(json["statistics"]["deposit_count"], 2);
        assert_eq!(json["statistics"]["roi_percent"], -96.67);
        assert_eq!(json["statistics"]["trend"], "stable");
        assert_eq!(json["statistics"]["histogram"][0]["range"], "50-100");
        assert!(json["statistics"]["histogram"][1]["max_value"].is_null());
    }

    #[test]
    fn test_json_key_order() {
        let result = analyze_csv(SCENARIO);
        let mut out = Vec::new();
        result.write_json(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let keys = [
            "\"total_deposited\"",
            "\"total_withdrawn\"",
            "\"net_result\"",
            "\"transaction_count\"",
            "\"best_month\"",
            "\"worst_month\"",
            "\"monthly_data\"",
            "\"transactions\"",
            "\"statistics\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| text.find(k).unwrap()).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_empty_json_has_null_months() {
        let result = analyze_csv("");
        let mut out = Vec::new();
        result.write_json(&mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert!(json["best_month"].is_null());
        assert!(json["worst_month"].is_null());
        assert_eq!(json["monthly_data"], serde_json::json!({}));
        assert_eq!(json["transactions"], serde_json::json!([]));
    }

    #[test]
    fn test_write_to_path_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        std::fs::write(&path, "stale content that is much longer than needed ".repeat(500)).unwrap();

        let result = analyze_csv(SCENARIO);
        result.write_to_path(&path).unwrap();
        let first = std::fs::read(&path).unwrap();
        result.write_to_path(&path).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert!(serde_json::from_slice::<serde_json::Value>(&first).is_ok());
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("analysis.json");

        let err = analyze_csv(SCENARIO).write_to_path(&path).unwrap_err();
        assert!(matches!(err, AnalyzerError::OutputWriteFailure { .. }));
    }
}
