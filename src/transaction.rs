//! Transaction models for CSV parsing and internal representation.

use crate::decimal::Money;
use crate::error::{AnalyzerError, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Date format used by the ledger's date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw transaction record as read from CSV.
///
/// Columns are read by position (date, type, value) because the header
/// labels in real ledgers are not reliable.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,

    /// Transaction type: `Deposit`, `Withdrawal`, or anything else
    pub tx_type: String,

    /// Comma-decimal amount, e.g. `1000,50`
    pub value: String,
}

impl TransactionRecord {
    /// Parses the raw CSV record into a typed transaction.
    ///
    /// `row` is the 1-based line number in the source, used for error context.
    pub fn parse(&self, row: usize) -> Result<ParsedTransaction> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|e| {
            AnalyzerError::MalformedRecord {
                row,
                field: "date",
                value: self.date.clone(),
                reason: e.to_string(),
            }
        })?;

        let value = self.parse_value(row)?;

        Ok(ParsedTransaction {
            row,
            date,
            kind: TxKind::from_label(&self.tx_type),
            value,
            timestamp: midnight_utc_timestamp(date),
        })
    }

    /// Parses the value field into non-negative `Money` within the
    /// per-value bounds.
    fn parse_value(&self, row: usize) -> Result<Money> {
        let malformed = |reason: String| AnalyzerError::MalformedRecord {
            row,
            field: "value",
            value: self.value.clone(),
            reason,
        };

        let value = Money::from_localized(&self.value).map_err(|e| malformed(e.to_string()))?;
        if value.is_negative() {
            return Err(malformed("value must not be negative".to_string()));
        }
        value.check_bounds().map_err(malformed)?;
        Ok(value)
    }
}

/// Seconds since the Unix epoch for midnight UTC of `date`.
pub fn midnight_utc_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Transaction type.
///
/// Labels are matched case-sensitively. Anything that is not exactly
/// `Deposit` or `Withdrawal` is carried through as `Other` and has no
/// effect on balances or totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxKind {
    /// Money committed to the ledger; lowers the cumulative net.
    Deposit,

    /// Money returned from the ledger; raises the cumulative net.
    Withdrawal,

    /// Unrecognized label, kept verbatim.
    Other(String),
}

impl TxKind {
    /// Maps a ledger type label to a kind.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Deposit" => TxKind::Deposit,
            "Withdrawal" => TxKind::Withdrawal,
            other => TxKind::Other(other.to_string()),
        }
    }

    /// The label as written in the ledger.
    pub fn as_str(&self) -> &str {
        match self {
            TxKind::Deposit => "Deposit",
            TxKind::Withdrawal => "Withdrawal",
            TxKind::Other(label) => label,
        }
    }

    /// Signed effect of `value` on the cumulative net, or `None` for `Other`.
    pub fn signed(&self, value: Money) -> Option<Money> {
        match self {
            TxKind::Deposit => Some(-value),
            TxKind::Withdrawal => Some(value),
            TxKind::Other(_) => None,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TxKind {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A parsed and validated transaction, as produced by the loader.
#[derive(Debug, Clone)]
pub struct ParsedTransaction {
    /// Line number in the source file (header is row 1)
    pub row: usize,

    /// Calendar date of the transaction
    pub date: NaiveDate,

    /// Transaction type
    pub kind: TxKind,

    /// Non-negative amount
    pub value: Money,

    /// Midnight UTC of `date`, seconds since epoch
    pub timestamp: i64,
}

impl ParsedTransaction {
    /// Month key (`YYYY-MM`) of this transaction.
    pub fn month_key(&self) -> String {
        month_key(self.date)
    }
}

/// Month key (`YYYY-MM`) for a date.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// A transaction after aggregation, carrying the running balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedTransaction {
    /// Calendar date, serialized as `YYYY-MM-DD`
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,

    /// Transaction type label
    #[serde(rename = "type")]
    pub kind: TxKind,

    /// Non-negative amount
    pub value: Money,

    /// Midnight UTC of `date`, seconds since epoch
    pub timestamp: i64,

    /// Signed running total after this transaction
    pub cumulative_net: Money,
}

impl ProcessedTransaction {
    /// Attaches the running total to a parsed transaction.
    pub fn from_parsed(tx: ParsedTransaction, cumulative_net: Money) -> Self {
        ProcessedTransaction {
            date: tx.date,
            kind: tx.kind,
            value: tx.value,
            timestamp: tx.timestamp,
            cumulative_net,
        }
    }
}

pub(crate) fn serialize_date<S>(date: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(DATE_FORMAT))
}
