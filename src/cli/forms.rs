//! Interactive prompts for transaction and search input.

use chrono::{NaiveDate, Utc};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::domain::ledger::Ledger;
use crate::domain::transaction::{Transaction, TransactionKind, TransactionPatch};
use crate::errors::{Result, TrackerError};
use crate::utils::{format_date, parse_amount, parse_date};

pub fn prompt_kind() -> Result<TransactionKind> {
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Kind")
        .items(&["Income", "Expense"])
        .default(0)
        .interact()?;
    Ok(match index {
        0 => TransactionKind::Income,
        _ => TransactionKind::Expense,
    })
}

pub fn prompt_category(ledger: &Ledger, kind: TransactionKind) -> Result<String> {
    let names = ledger.categories.for_kind(kind);
    if names.is_empty() {
        return Err(TrackerError::Input(format!(
            "no {} categories registered; add one from the category menu first",
            kind.to_string().to_lowercase()
        )));
    }
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Category")
        .items(names)
        .default(0)
        .interact()?;
    Ok(names[index].clone())
}

pub fn prompt_description() -> Result<String> {
    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Description")
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if input.trim().is_empty() {
                Err("description must not be empty".into())
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(description.trim().to_string())
}

pub fn prompt_amount(prompt: &str) -> Result<f64> {
    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            parse_amount(input).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()?;
    parse_amount(&raw)
}

pub fn prompt_date(prompt: &str) -> Result<NaiveDate> {
    let today = Utc::now().date_naive();
    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(format_date(today))
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            parse_date(input).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()?;
    parse_date(&raw)
}

pub fn prompt_id(prompt: &str) -> Result<u64> {
    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            input
                .trim()
                .parse::<u64>()
                .map(|_| ())
                .map_err(|_| "expected a numeric id".into())
        })
        .interact_text()?;
    raw.trim()
        .parse()
        .map_err(|_| TrackerError::Input(format!("invalid id `{}`", raw.trim())))
}

pub fn prompt_text(prompt: &str) -> Result<String> {
    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?;
    Ok(raw.trim().to_string())
}

pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Collects the input for a new transaction.
pub fn prompt_new_transaction(
    ledger: &Ledger,
) -> Result<(TransactionKind, String, String, f64, NaiveDate)> {
    let kind = prompt_kind()?;
    let category = prompt_category(ledger, kind)?;
    let description = prompt_description()?;
    let amount = prompt_amount("Amount")?;
    let occurred_at = prompt_date("Date")?;
    Ok((kind, category, description, amount, occurred_at))
}

/// Collects a partial update for `current`; empty answers keep the field.
pub fn prompt_patch(ledger: &Ledger, current: &Transaction) -> Result<TransactionPatch> {
    let mut patch = TransactionPatch::default();

    let kind_index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Kind (current: {})", current.kind))
        .items(&["Keep", "Income", "Expense"])
        .default(0)
        .interact()?;
    patch.kind = match kind_index {
        1 => Some(TransactionKind::Income),
        2 => Some(TransactionKind::Expense),
        _ => None,
    };

    let kind = patch.kind.unwrap_or(current.kind);
    let names = ledger.categories.for_kind(kind);
    let mut category_items = vec![format!("Keep ({})", current.category)];
    category_items.extend(names.iter().cloned());
    let category_index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Category")
        .items(&category_items)
        .default(0)
        .interact()?;
    if category_index > 0 {
        patch.category = Some(names[category_index - 1].clone());
    } else if patch.kind.is_some() {
        // A kind change invalidates the old category, so one must be picked.
        return Err(TrackerError::Input(
            "changing the kind requires picking a category for it".into(),
        ));
    }

    let description: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Description (current: {})", current.description))
        .allow_empty(true)
        .interact_text()?;
    if !description.trim().is_empty() {
        patch.description = Some(description.trim().to_string());
    }

    let amount: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Amount (current: {:.2})", current.amount))
        .allow_empty(true)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            parse_amount(input).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()?;
    if !amount.trim().is_empty() {
        patch.amount = Some(parse_amount(&amount)?);
    }

    let date: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Date (current: {})", format_date(current.occurred_at)))
        .allow_empty(true)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            parse_date(input).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()?;
    if !date.trim().is_empty() {
        patch.occurred_at = Some(parse_date(&date)?);
    }

    Ok(patch)
}

/// Start and end dates for a period search, inclusive.
pub fn prompt_period() -> Result<(NaiveDate, NaiveDate)> {
    let start = prompt_date("Start date")?;
    let end = prompt_date("End date")?;
    if end < start {
        return Err(TrackerError::Input("end date is before start date".into()));
    }
    Ok((start, end))
}

/// Minimum and maximum amount for a range search, inclusive.
pub fn prompt_amount_range() -> Result<(f64, f64)> {
    let min = prompt_amount("Minimum amount")?;
    let max = prompt_amount("Maximum amount")?;
    if max < min {
        return Err(TrackerError::Input("maximum is below minimum".into()));
    }
    Ok((min, max))
}
