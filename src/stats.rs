//! Descriptive statistics derived from an aggregated ledger.
//!
//! These complement the headline totals: per-kind counts and averages,
//! return on deposits, month win rate, peaks and valleys of the running net,
//! month-over-month movement, a three-month trend, and a value histogram.

use crate::aggregate::{Aggregation, MonthlyData};
use crate::decimal::{Money, Ratio};
use crate::transaction::{month_key, serialize_date, ProcessedTransaction, TxKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of months on each side of the trend comparison.
const TREND_WINDOW: usize = 3;

/// Trend changes within this many percent either way count as stable.
const TREND_THRESHOLD: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Histogram bucket bounds as `(label, min, max)`; `max` is exclusive.
const HISTOGRAM_BOUNDS: [(&str, u32, Option<u32>); 5] = [
    ("<10", 0, Some(10)),
    ("10-50", 10, Some(50)),
    ("50-100", 50, Some(100)),
    ("100-200", 100, Some(200)),
    ("200+", 200, None),
];

/// The largest single deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LargestTransaction {
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub value: Money,
}

/// Running net at a given transaction date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalancePoint {
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub balance: Money,
}

/// Net change between two consecutive months in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthChange {
    pub month: String,
    pub previous_net: Money,
    pub current_net: Money,
    /// `(current - previous) / |previous| * 100`, zero when `previous` is zero.
    pub change_percent: Ratio,
}

/// Direction of the recent monthly net compared to the months before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    fn from_percent(change: Ratio) -> Self {
        let change = change.as_decimal();
        if change > TREND_THRESHOLD {
            Trend::Improving
        } else if change < -TREND_THRESHOLD {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
        }
    }
}

/// Deposits and withdrawals whose value falls in `[min_value, max_value)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBucket {
    pub range: &'static str,
    pub min_value: Money,
    /// `None` for the open-ended top bucket.
    pub max_value: Option<Money>,
    pub count: usize,
    pub deposits: usize,
    pub withdrawals: usize,
}

impl HistogramBucket {
    fn contains(&self, value: Money) -> bool {
        value >= self.min_value && self.max_value.map_or(true, |max| value < max)
    }
}

/// Supplementary statistics for a ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerStatistics {
    pub deposit_count: usize,
    pub withdrawal_count: usize,
    pub max_deposit: Money,
    pub max_withdrawal: Money,
    pub avg_deposit: Money,
    pub avg_withdrawal: Money,
    /// Net result as a percentage of total deposited.
    pub roi_percent: Ratio,
    /// Months whose net is above zero.
    pub profitable_months: usize,
    pub win_rate_percent: Ratio,
    pub trend: Trend,
    /// Last three months' average net against the three months before.
    pub trend_percent: Ratio,
    pub last_3_months_avg: Money,
    pub overall_avg: Money,
    pub largest_transaction: Option<LargestTransaction>,
    pub most_active_month: Option<String>,
    pub avg_days_between_transactions: Ratio,
    pub peak: Option<BalancePoint>,
    pub valley: Option<BalancePoint>,
    pub month_over_month: Vec<MonthChange>,
    /// Non-empty buckets only.
    pub histogram: Vec<HistogramBucket>,
}

impl LedgerStatistics {
    /// Computes all statistics from an aggregation.
    pub fn compute(aggregation: &Aggregation) -> Self {
        let txs = &aggregation.transactions;
        let deposits: Vec<Money> = values_of(txs, &TxKind::Deposit);
        let withdrawals: Vec<Money> = values_of(txs, &TxKind::Withdrawal);

        let net_result = aggregation.total_withdrawn - aggregation.total_deposited;
        let profitable_months = aggregation
            .monthly
            .values()
            .filter(|bucket| bucket.net > Money::ZERO)
            .count();
        let trend = MonthlyTrend::compute(&aggregation.monthly);

        LedgerStatistics {
            deposit_count: deposits.len(),
            withdrawal_count: withdrawals.len(),
            max_deposit: deposits.iter().copied().max().unwrap_or(Money::ZERO),
            max_withdrawal: withdrawals.iter().copied().max().unwrap_or(Money::ZERO),
            avg_deposit: average(aggregation.total_deposited, deposits.len()),
            avg_withdrawal: average(aggregation.total_withdrawn, withdrawals.len()),
            roi_percent: Ratio::percent(
                net_result.as_decimal(),
                aggregation.total_deposited.as_decimal(),
            ),
            profitable_months,
            win_rate_percent: Ratio::percent(
                Decimal::from(profitable_months),
                Decimal::from(aggregation.monthly.len()),
            ),
            trend: Trend::from_percent(trend.change),
            trend_percent: trend.change,
            last_3_months_avg: trend.recent_avg,
            overall_avg: trend.overall_avg,
            largest_transaction: largest_transaction(txs),
            most_active_month: most_active_month(txs),
            avg_days_between_transactions: avg_days_between(txs),
            peak: first_extreme(txs, |candidate, best| candidate > best),
            valley: first_extreme(txs, |candidate, best| candidate < best),
            month_over_month: month_over_month(&aggregation.monthly),
            histogram: histogram(txs),
        }
    }
}

fn values_of(txs: &[ProcessedTransaction], kind: &TxKind) -> Vec<Money> {
    txs.iter()
        .filter(|tx| &tx.kind == kind)
        .map(|tx| tx.value)
        .collect()
}

fn average(total: Money, count: usize) -> Money {
    if count == 0 {
        return Money::ZERO;
    }
    Money::new(total.as_decimal() / Decimal::from(count))
}

fn average_net(nets: &[Money]) -> Money {
    average(nets.iter().sum(), nets.len())
}

struct MonthlyTrend {
    recent_avg: Money,
    overall_avg: Money,
    change: Ratio,
}

impl MonthlyTrend {
    /// Compares the last [`TREND_WINDOW`] months with the window before.
    ///
    /// With no earlier window the baseline is the overall average when
    /// there are more than [`TREND_WINDOW`] months, otherwise zero, and a
    /// zero baseline yields a zero change.
    fn compute(monthly: &MonthlyData) -> Self {
        let nets: Vec<Money> = monthly.values().map(|bucket| bucket.net).collect();
        let len = nets.len();

        let recent = &nets[len.saturating_sub(TREND_WINDOW)..];
        let previous =
            &nets[len.saturating_sub(2 * TREND_WINDOW)..len.saturating_sub(TREND_WINDOW)];

        let recent_avg = average_net(recent);
        let overall_avg = average_net(&nets);
        let baseline = if !previous.is_empty() {
            average_net(previous)
        } else if len > TREND_WINDOW {
            overall_avg
        } else {
            Money::ZERO
        };

        MonthlyTrend {
            recent_avg,
            overall_avg,
            change: Ratio::percent(
                (recent_avg - baseline).as_decimal(),
                baseline.abs().as_decimal(),
            ),
        }
    }
}

/// Counts recognized transactions per value range, dropping empty ranges.
fn histogram(txs: &[ProcessedTransaction]) -> Vec<HistogramBucket> {
    let mut buckets: Vec<HistogramBucket> = HISTOGRAM_BOUNDS
        .iter()
        .map(|&(range, min, max)| HistogramBucket {
            range,
            min_value: Money::new(Decimal::from(min)),
            max_value: max.map(|max| Money::new(Decimal::from(max))),
            count: 0,
            deposits: 0,
            withdrawals: 0,
        })
        .collect();

    for tx in txs {
        let Some(bucket) = buckets.iter_mut().find(|b| b.contains(tx.value)) else {
            continue;
        };
        match tx.kind {
            TxKind::Deposit => bucket.deposits += 1,
            TxKind::Withdrawal => bucket.withdrawals += 1,
            TxKind::Other(_) => continue,
        }
        bucket.count += 1;
    }

    buckets.retain(|bucket| bucket.count > 0);
    buckets
}

/// Largest deposit or withdrawal; the earliest wins on ties.
fn largest_transaction(txs: &[ProcessedTransaction]) -> Option<LargestTransaction> {
    txs.iter()
        .filter(|tx| !matches!(tx.kind, TxKind::Other(_)))
        .fold(None::<&ProcessedTransaction>, |best, tx| match best {
            Some(b) if tx.value <= b.value => Some(b),
            _ => Some(tx),
        })
        .map(|tx| LargestTransaction {
            date: tx.date,
            kind: tx.kind.clone(),
            value: tx.value,
        })
}

/// Month with the most transactions of any type; the earliest wins on ties.
fn most_active_month(txs: &[ProcessedTransaction]) -> Option<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for tx in txs {
        *counts.entry(month_key(tx.date)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .fold(None::<(String, usize)>, |best, (month, count)| match best {
            Some((_, best_count)) if count <= best_count => best,
            _ => Some((month, count)),
        })
        .map(|(month, _)| month)
}

fn avg_days_between(txs: &[ProcessedTransaction]) -> Ratio {
    match (txs.first(), txs.last()) {
        (Some(first), Some(last)) if txs.len() > 1 => {
            let days = (last.date - first.date).num_days();
            Ratio::new(Decimal::from(days) / Decimal::from(txs.len() - 1))
        }
        _ => Ratio::ZERO,
    }
}

/// First transaction whose running net beats every earlier one under `better`.
fn first_extreme<F>(txs: &[ProcessedTransaction], better: F) -> Option<BalancePoint>
where
    F: Fn(Money, Money) -> bool,
{
    txs.iter()
        .fold(None::<&ProcessedTransaction>, |best, tx| match best {
            Some(b) if !better(tx.cumulative_net, b.cumulative_net) => Some(b),
            _ => Some(tx),
        })
        .map(|tx| BalancePoint {
            date: tx.date,
            balance: tx.cumulative_net,
        })
}

fn month_over_month(monthly: &MonthlyData) -> Vec<MonthChange> {
    let months: Vec<_> = monthly.iter().collect();
    months
        .windows(2)
        .map(|pair| {
            let (_, previous) = pair[0];
            let (month, current) = pair[1];
            let change = current.net - previous.net;
            MonthChange {
                month: month.clone(),
                previous_net: previous.net,
                current_net: current.net,
                change_percent: Ratio::percent(
                    change.as_decimal(),
                    previous.net.abs().as_decimal(),
                ),
            }
        })
        .collect()
}
