//! Crate-wide helpers: tracing bootstrap, rounding, parsing, formatting.

use std::sync::Once;

use chrono::NaiveDate;

use crate::config::{CURRENCY_SYMBOL, DATE_FORMAT};
use crate::errors::{Result, TrackerError};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("fintrack_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Rounds a monetary amount to two decimal places.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Parses a `YYYY-MM-DD` date from user input.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| TrackerError::Validation(format!("invalid date `{}`", input.trim())))
}

/// Parses a positive monetary amount, tolerating a comma decimal separator.
pub fn parse_amount(input: &str) -> Result<f64> {
    let cleaned = input.trim().replace(',', ".");
    let value: f64 = cleaned
        .parse()
        .map_err(|_| TrackerError::Validation(format!("invalid amount `{}`", input.trim())))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(TrackerError::Validation(format!(
            "amount must be a positive number, got {}",
            input.trim()
        )));
    }
    Ok(value)
}

pub fn format_currency(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL} {amount:.2}")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
