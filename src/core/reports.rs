//! Report engine: pure aggregation over a transaction snapshot.
//!
//! Every function here is stateless and total over its input: empty input
//! yields empty or zero-valued aggregates, never an error.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::transaction::{Transaction, TransactionKind};

/// Overall income/expense totals and their difference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Balance {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

pub fn balance(transactions: &[Transaction]) -> Balance {
    let mut income = 0.0;
    let mut expense = 0.0;
    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => income += txn.amount,
            TransactionKind::Expense => expense += txn.amount,
        }
    }
    Balance {
        income,
        expense,
        net: income - expense,
    }
}

/// Per-category totals for one kind, descending by total.
///
/// Equal totals are ordered by ascending category name so the ranking is
/// deterministic.
pub fn totals_by_category(
    transactions: &[Transaction],
    kind: TransactionKind,
) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for txn in transactions.iter().filter(|txn| txn.kind == kind) {
        *totals.entry(txn.category.as_str()).or_insert(0.0) += txn.amount;
    }
    let mut ranked: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(name, total)| (name.to_string(), total))
        .collect();
    // BTreeMap already yields names ascending; a stable sort on the total
    // keeps that order for ties.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

/// Income, expense, and net accumulated per calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// Month key formatted `YYYY-MM`.
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

/// Monthly accumulation over the whole snapshot, month keys ascending.
pub fn monthly_accumulated(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for txn in transactions {
        let entry = months.entry(txn.month_key()).or_insert((0.0, 0.0));
        match txn.kind {
            TransactionKind::Income => entry.0 += txn.amount,
            TransactionKind::Expense => entry.1 += txn.amount,
        }
    }
    months
        .into_iter()
        .map(|(month, (income, expense))| MonthlyTotals {
            month,
            income,
            expense,
            net: income - expense,
        })
        .collect()
}

/// The `n` largest expense categories, descending by total spend.
pub fn top_categories(transactions: &[Transaction], n: usize) -> Vec<(String, f64)> {
    let mut ranked = totals_by_category(transactions, TransactionKind::Expense);
    ranked.truncate(n);
    ranked
}

/// Leading partial-window moving average.
///
/// Position `i` averages `values[max(0, i - window + 1) ..= i]`, so the
/// first points smooth over fewer samples. A zero window yields nothing.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if values.is_empty() || window == 0 {
        return Vec::new();
    }
    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(window - 1);
            let slice = &values[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Month keys and the matching expense totals, ready for charting.
pub fn expense_series(transactions: &[Transaction]) -> (Vec<String>, Vec<f64>) {
    monthly_accumulated(transactions)
        .into_iter()
        .map(|entry| (entry.month, entry.expense))
        .unzip()
}

/// Simple descriptive statistics over one kind of transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmountStats {
    pub average: f64,
    pub largest: f64,
    pub count: usize,
}

/// Average and largest amount for `kind`, or `None` when no such
/// transaction exists.
pub fn amount_stats(transactions: &[Transaction], kind: TransactionKind) -> Option<AmountStats> {
    let amounts: Vec<f64> = transactions
        .iter()
        .filter(|txn| txn.kind == kind)
        .map(|txn| txn.amount)
        .collect();
    if amounts.is_empty() {
        return None;
    }
    let total: f64 = amounts.iter().sum();
    let largest = amounts.iter().cloned().fold(f64::MIN, f64::max);
    Some(AmountStats {
        average: total / amounts.len() as f64,
        largest,
        count: amounts.len(),
    })
}
