//! Ledger loading.
//!
//! Reads a `;`-delimited ledger with a header row and three positional
//! columns (date, type, value). A leading UTF-8 byte-order mark is ignored.
//! The first row that fails to parse aborts the load.

use crate::error::{AnalyzerError, Result};
use crate::transaction::{ParsedTransaction, TransactionRecord, TxKind};
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Field separator used by ledger files.
pub const DELIMITER: u8 = b';';

/// Positional column names, in order.
pub const COLUMNS: [&str; 3] = ["date", "type", "value"];

const BOM: char = '\u{feff}';

/// Loads every transaction from the ledger file at `path`.
///
/// The file is read completely and closed before parsing starts.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<ParsedTransaction>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    info!("Read {} bytes from {}", contents.len(), path.display());
    load_str(&contents)
}

/// Loads every transaction from an in-memory ledger.
pub fn load_str(contents: &str) -> Result<Vec<ParsedTransaction>> {
    let contents = contents.strip_prefix(BOM).unwrap_or(contents);
    load_reader(contents.as_bytes())
}

/// Loads every transaction from a reader.
///
/// The reader is expected to be positioned after any byte-order mark.
pub fn load_reader<R: Read>(reader: R) -> Result<Vec<ParsedTransaction>> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if let Some(missing) = COLUMNS.get(headers.len()) {
        return Err(AnalyzerError::MissingField { field: *missing });
    }
    debug!("Header: {:?}", headers);

    let mut transactions = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row
        let record = result?;

        if record.len() < COLUMNS.len() {
            return Err(AnalyzerError::MalformedRecord {
                row: row_num,
                field: COLUMNS[record.len()],
                value: String::new(),
                reason: format!("expected {} fields, found {}", COLUMNS.len(), record.len()),
            });
        }

        let raw: TransactionRecord = record.deserialize(None)?;
        let tx = raw.parse(row_num)?;

        if let TxKind::Other(label) = &tx.kind {
            warn!(
                "Row {}: Unrecognized transaction type {:?}, passing through",
                row_num, label
            );
        }
        debug!("Row {}: {} {} on {}", row_num, tx.kind, tx.value, tx.date);
        transactions.push(tx);
    }

    info!("Loaded {} transactions", transactions.len());
    Ok(transactions)
}
