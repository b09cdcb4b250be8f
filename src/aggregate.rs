//! Running balance and per-month totals.
//!
//! Aggregation is a single fold over the transactions in timestamp order.
//! Deposits lower the running net and withdrawals raise it; unrecognized
//! types leave everything untouched.

use crate::decimal::Money;
use crate::transaction::{ParsedTransaction, ProcessedTransaction, TxKind};
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;

/// Deposit, withdrawal and net totals for one calendar month.
///
/// # Invariants
///
/// - `net == withdrawal - deposit`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    /// Sum of deposit values in the month.
    pub deposit: Money,

    /// Sum of withdrawal values in the month.
    pub withdrawal: Money,

    /// `withdrawal - deposit` for the month.
    pub net: Money,
}

impl MonthlyBucket {
    /// Adds one transaction to the bucket. `Other` kinds are ignored.
    pub fn record(&mut self, kind: &TxKind, value: Money) {
        match kind {
            TxKind::Deposit => {
                self.deposit += value;
                self.net -= value;
            }
            TxKind::Withdrawal => {
                self.withdrawal += value;
                self.net += value;
            }
            TxKind::Other(_) => {}
        }
    }
}

/// Month key (`YYYY-MM`) to bucket, iterated in chronological order.
pub type MonthlyData = BTreeMap<String, MonthlyBucket>;

/// Result of aggregating a ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Transactions sorted by timestamp, each carrying its running net.
    pub transactions: Vec<ProcessedTransaction>,

    /// Per-month totals.
    pub monthly: MonthlyData,

    /// Sum of all deposit values.
    pub total_deposited: Money,

    /// Sum of all withdrawal values.
    pub total_withdrawn: Money,
}

impl Aggregation {
    /// Running net after the last transaction, or zero when empty.
    pub fn final_net(&self) -> Money {
        self.transactions
            .last()
            .map(|tx| tx.cumulative_net)
            .unwrap_or(Money::ZERO)
    }

    fn push(mut self, tx: ParsedTransaction) -> Self {
        let running = self.final_net();
        let cumulative_net = match tx.kind.signed(tx.value) {
            Some(delta) => running + delta,
            None => running,
        };

        match tx.kind {
            TxKind::Deposit => self.total_deposited += tx.value,
            TxKind::Withdrawal => self.total_withdrawn += tx.value,
            TxKind::Other(_) => {}
        }

        if !matches!(tx.kind, TxKind::Other(_)) {
            self.monthly
                .entry(tx.month_key())
                .or_default()
                .record(&tx.kind, tx.value);
        }

        debug!(
            "Row {}: {} {} -> cumulative net {}",
            tx.row, tx.kind, tx.value, cumulative_net
        );
        self.transactions
            .push(ProcessedTransaction::from_parsed(tx, cumulative_net));
        self
    }
}

/// Sorts the transactions by timestamp and folds them into an [`Aggregation`].
///
/// The sort is stable, so transactions on the same day keep their input order.
pub fn aggregate(mut transactions: Vec<ParsedTransaction>) -> Aggregation {
    transactions.sort_by_key(|tx| tx.timestamp);

    let initial = Aggregation {
        transactions: Vec::with_capacity(transactions.len()),
        ..Aggregation::default()
    };
    let aggregation = transactions.into_iter().fold(initial, Aggregation::push);

    info!(
        "Aggregated {} transactions into {} months",
        aggregation.transactions.len(),
        aggregation.monthly.len()
    );
    aggregation
}
