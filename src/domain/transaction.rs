//! Domain model for ledger transactions.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};

/// A single income or expense record.
///
/// `id` and `created_at` are assigned once by the transaction service and
/// never change afterwards; everything else can be patched in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub amount: f64,
    #[serde(with = "occurred_date")]
    pub occurred_at: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        id: u64,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        occurred_at: NaiveDate,
    ) -> Self {
        Self {
            id,
            kind,
            category: category.into(),
            description: description.into(),
            amount,
            occurred_at,
            created_at: Utc::now(),
        }
    }

    /// Checks the field-level invariants shared by add and update paths.
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(TrackerError::Validation(
                "description must not be empty".into(),
            ));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(TrackerError::Validation(format!(
                "amount must be a positive number, got {}",
                self.amount
            )));
        }
        Ok(())
    }

    /// Calendar month of `occurred_at`, formatted `YYYY-MM`.
    pub fn month_key(&self) -> String {
        self.occurred_at.format("%Y-%m").to_string()
    }
}

/// Classifies a transaction as money coming in or going out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Partial update for a transaction: only supplied fields change.
///
/// `id` and `created_at` are deliberately not representable here.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub occurred_at: Option<NaiveDate>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.occurred_at.is_none()
    }
}

/// Serde helpers for `occurred_at`.
///
/// Writes plain `YYYY-MM-DD`. Reading also accepts full ISO datetime
/// strings, which older data files stored, and keeps their date part.
mod occurred_date {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{self, Deserialize, Deserializer, Serializer};

    const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(date) = NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            return Ok(date);
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|dt| dt.date())
            .map_err(|_| {
                serde::de::Error::custom(format!("invalid transaction date `{raw}`"))
            })
    }
}
