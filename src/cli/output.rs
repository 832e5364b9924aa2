//! Terminal rendering: tables, summary screens, and the monthly chart.

use colored::Colorize;

use crate::config::{CHART_BAR_WIDTH, MAX_ROWS_DISPLAY};
use crate::core::reports;
use crate::domain::ledger::Ledger;
use crate::domain::transaction::{Transaction, TransactionKind};
use crate::utils::{format_currency, format_date};

const MOVING_AVERAGE_WINDOW: usize = 3;

/// Prints a transaction table, capped at the configured row count.
pub fn render_table(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions recorded.");
        return;
    }
    println!(
        "{}",
        format!(
            "{:<5} {:<12} {:<8} {:<18} {:<32} {:>12}",
            "ID", "Date", "Kind", "Category", "Description", "Amount"
        )
        .bold()
    );
    for txn in transactions.iter().take(MAX_ROWS_DISPLAY) {
        let amount = format_currency(txn.amount);
        let amount = match txn.kind {
            TransactionKind::Income => amount.green(),
            TransactionKind::Expense => amount.red(),
        };
        println!(
            "{:<5} {:<12} {:<8} {:<18} {:<32} {:>12}",
            txn.id,
            format_date(txn.occurred_at),
            txn.kind.to_string(),
            txn.category,
            truncated(&txn.description, 32),
            amount
        );
    }
    if transactions.len() > MAX_ROWS_DISPLAY {
        println!(
            "... and {} more (showing first {MAX_ROWS_DISPLAY})",
            transactions.len() - MAX_ROWS_DISPLAY
        );
    }
}

/// Prints the balance, per-kind statistics, and the top expense categories.
pub fn render_summary(ledger: &Ledger) {
    let transactions = &ledger.transactions;
    let balance = reports::balance(transactions);

    println!("{}", "Summary".bold());
    println!("  Income:  {}", format_currency(balance.income).green());
    println!("  Expense: {}", format_currency(balance.expense).red());
    let net = format_currency(balance.net);
    let net = if balance.net < 0.0 { net.red() } else { net.green() };
    println!("  Net:     {net}");

    for kind in [TransactionKind::Income, TransactionKind::Expense] {
        if let Some(stats) = reports::amount_stats(transactions, kind) {
            println!(
                "  {kind}: {} records, average {}, largest {}",
                stats.count,
                format_currency(stats.average),
                format_currency(stats.largest)
            );
        }
    }

    let top = reports::top_categories(transactions, 5);
    if !top.is_empty() {
        println!("{}", "Top expense categories".bold());
        for (name, total) in top {
            println!("  {:<18} {}", name, format_currency(total));
        }
    }
}

/// Prints per-month bars for expenses with a moving-average column.
pub fn render_monthly_chart(ledger: &Ledger) {
    let (months, values) = reports::expense_series(&ledger.transactions);
    if months.is_empty() {
        println!("No transactions recorded.");
        return;
    }
    let averages = reports::moving_average(&values, MOVING_AVERAGE_WINDOW);
    let max = values.iter().cloned().fold(0.0_f64, f64::max);

    println!(
        "{}",
        format!("Monthly expenses ({MOVING_AVERAGE_WINDOW}-month moving average)").bold()
    );
    for (i, month) in months.iter().enumerate() {
        println!(
            "{month}  {:<width$}  {:>12}  avg {:>12}",
            bar(values[i], max),
            format_currency(values[i]),
            format_currency(averages[i]),
            width = CHART_BAR_WIDTH
        );
    }
}

/// Prints the monthly accumulation table (income, expense, net per month).
pub fn render_monthly_table(ledger: &Ledger) {
    let months = reports::monthly_accumulated(&ledger.transactions);
    if months.is_empty() {
        println!("No transactions recorded.");
        return;
    }
    println!(
        "{}",
        format!("{:<10} {:>14} {:>14} {:>14}", "Month", "Income", "Expense", "Net").bold()
    );
    for entry in months {
        println!(
            "{:<10} {:>14} {:>14} {:>14}",
            entry.month,
            format_currency(entry.income),
            format_currency(entry.expense),
            format_currency(entry.net)
        );
    }
}

/// Prints the registered categories for both kinds.
pub fn render_categories(ledger: &Ledger) {
    for kind in [TransactionKind::Income, TransactionKind::Expense] {
        println!("{}", format!("{kind} categories").bold());
        for name in ledger.categories.for_kind(kind) {
            println!("  {name}");
        }
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * CHART_BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.min(CHART_BAR_WIDTH))
}

fn truncated(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_the_configured_width() {
        assert_eq!(bar(50.0, 100.0).chars().count(), CHART_BAR_WIDTH / 2);
        assert_eq!(bar(100.0, 100.0).chars().count(), CHART_BAR_WIDTH);
        assert!(bar(10.0, 0.0).is_empty());
    }

    #[test]
    fn truncated_appends_ellipsis_only_when_needed() {
        assert_eq!(truncated("short", 10), "short");
        assert_eq!(truncated("abcdefghij", 5), "abcd…");
    }
}
