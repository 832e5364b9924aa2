//! CLI entry point: subcommand dispatch plus the interactive menu loop.

use std::env;
use std::path::Path;

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Select};

use crate::cli::{forms, output};
use crate::core::services::{CategoryService, TransactionService};
use crate::core::tracker::FinanceTracker;
use crate::errors::{Result, TrackerError};
use crate::export;
use crate::storage::JsonStorage;

const USAGE: &str = "\
Usage: fintrack [COMMAND]

Running without a command opens the interactive menu.

Commands:
  summary          Print income/expense totals and top categories
  list             Print all transactions, newest first
  export <FILE>    Write all transactions to a semicolon-delimited CSV
  version          Print the version
  help             Print this message";

/// Runs the CLI against the configured data file.
pub fn run_cli() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut tracker = FinanceTracker::open(Box::new(JsonStorage::at_default_path()));

    match args.first().map(String::as_str) {
        None => interactive_loop(&mut tracker),
        Some("summary") => {
            output::render_summary(tracker.ledger());
            Ok(())
        }
        Some("list") => {
            output::render_table(&TransactionService::list_sorted(tracker.ledger(), true));
            Ok(())
        }
        Some("export") => {
            let path = args
                .get(1)
                .ok_or_else(|| TrackerError::Input("usage: fintrack export <FILE>".into()))?;
            export_snapshot(&tracker, Path::new(path))
        }
        Some("version" | "--version") => {
            println!("fintrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some("help" | "--help" | "-h") => {
            println!("{USAGE}");
            Ok(())
        }
        Some(other) => Err(TrackerError::Input(format!(
            "unknown command `{other}`; try `fintrack help`"
        ))),
    }
}

fn interactive_loop(tracker: &mut FinanceTracker) -> Result<()> {
    loop {
        println!();
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("fintrack")
            .items(&[
                "Add transaction",
                "List transactions",
                "Edit transaction",
                "Delete transaction",
                "Summary",
                "Monthly chart",
                "Search",
                "Manage categories",
                "Export CSV",
                "Clear all transactions",
                "Exit",
            ])
            .default(0)
            .interact()?;

        let outcome = match choice {
            0 => add_transaction(tracker),
            1 => {
                output::render_table(&TransactionService::list_sorted(tracker.ledger(), true));
                Ok(())
            }
            2 => edit_transaction(tracker),
            3 => delete_transaction(tracker),
            4 => {
                output::render_summary(tracker.ledger());
                Ok(())
            }
            5 => {
                output::render_monthly_table(tracker.ledger());
                output::render_monthly_chart(tracker.ledger());
                Ok(())
            }
            6 => search(tracker),
            7 => manage_categories(tracker),
            8 => {
                let path = forms::prompt_text("Export file path")?;
                export_snapshot(tracker, Path::new(&path))
            }
            9 => clear_all(tracker),
            _ => return Ok(()),
        };

        // Bad input or a failed save should not end the session.
        if let Err(err) = outcome {
            eprintln!("{} {err}", "error:".red().bold());
        }
    }
}

fn add_transaction(tracker: &mut FinanceTracker) -> Result<()> {
    let (kind, category, description, amount, occurred_at) =
        forms::prompt_new_transaction(tracker.ledger())?;
    let txn = tracker.add(kind, category, description, amount, occurred_at)?;
    println!("Recorded transaction #{} ({}).", txn.id, txn.kind);
    Ok(())
}

fn edit_transaction(tracker: &mut FinanceTracker) -> Result<()> {
    let id = forms::prompt_id("Transaction id")?;
    let Some(current) = tracker.get(id).cloned() else {
        println!("Transaction {id} not found.");
        return Ok(());
    };
    let patch = forms::prompt_patch(tracker.ledger(), &current)?;
    if patch.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }
    if tracker.update(id, patch)? {
        println!("Transaction {id} updated.");
    }
    Ok(())
}

fn delete_transaction(tracker: &mut FinanceTracker) -> Result<()> {
    let id = forms::prompt_id("Transaction id")?;
    if tracker.get(id).is_none() {
        println!("Transaction {id} not found.");
        return Ok(());
    }
    if !forms::confirm(&format!("Delete transaction {id}?"))? {
        return Ok(());
    }
    if tracker.remove(id)? {
        println!("Transaction {id} deleted.");
    }
    Ok(())
}

fn search(tracker: &FinanceTracker) -> Result<()> {
    let ledger = tracker.ledger();
    let mode = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Search by")
        .items(&["Period", "Description", "Category", "Amount range"])
        .default(0)
        .interact()?;
    let hits = match mode {
        0 => {
            let (start, end) = forms::prompt_period()?;
            TransactionService::filter_by_period(ledger, start, end)
        }
        1 => {
            let term = forms::prompt_text("Description contains")?;
            TransactionService::filter_by_description(ledger, &term)
        }
        2 => {
            let kind = forms::prompt_kind()?;
            let category = forms::prompt_category(ledger, kind)?;
            TransactionService::filter_by_category(ledger, &category)
        }
        _ => {
            let (min, max) = forms::prompt_amount_range()?;
            TransactionService::filter_by_amount_range(ledger, min, max)
        }
    };
    output::render_table(&hits);
    Ok(())
}

fn manage_categories(tracker: &mut FinanceTracker) -> Result<()> {
    let action = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Categories")
        .items(&["Show", "Add", "Remove"])
        .default(0)
        .interact()?;
    match action {
        0 => output::render_categories(tracker.ledger()),
        1 => {
            let kind = forms::prompt_kind()?;
            let name = forms::prompt_text("New category name")?;
            if tracker.add_category(kind, &name)? {
                println!("Category `{name}` added.");
            } else {
                println!("Category `{name}` already exists (or the name is blank).");
            }
        }
        _ => {
            let kind = forms::prompt_kind()?;
            let names = CategoryService::list(tracker.ledger(), kind);
            if names.is_empty() {
                println!("No categories registered.");
                return Ok(());
            }
            let index = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Remove which category?")
                .items(&names)
                .default(0)
                .interact()?;
            let name = &names[index];
            if tracker.remove_category(kind, name)? {
                println!("Category `{name}` removed. Existing transactions keep the label.");
            }
        }
    }
    Ok(())
}

fn clear_all(tracker: &mut FinanceTracker) -> Result<()> {
    let count = tracker.ledger().transaction_count();
    if count == 0 {
        println!("No transactions recorded.");
        return Ok(());
    }
    if !forms::confirm(&format!(
        "Permanently delete all {count} transactions? This cannot be undone"
    ))? {
        return Ok(());
    }
    tracker.clear()?;
    println!("Ledger cleared.");
    Ok(())
}

fn export_snapshot(tracker: &FinanceTracker, path: &Path) -> Result<()> {
    let snapshot = TransactionService::list_sorted(tracker.ledger(), false);
    export::export_csv(&snapshot, path)?;
    println!(
        "Exported {} transactions to {}.",
        snapshot.len(),
        path.display()
    );
    Ok(())
}
