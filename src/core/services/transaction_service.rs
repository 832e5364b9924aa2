//! Business logic helpers for managing transactions.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::ledger::Ledger;
use crate::domain::transaction::{Transaction, TransactionKind, TransactionPatch};
use crate::errors::{Result, TrackerError};
use crate::utils::round_cents;

/// Provides validated CRUD helpers and filters for ledger transactions.
///
/// Not-found is reported as a value (`Option` / `bool` / `Ok(false)`), never
/// as an error; validation failures abort with no partial mutation.
pub struct TransactionService;

impl TransactionService {
    /// Adds a new transaction and returns its identifier.
    ///
    /// The amount is rounded to cents on write and the category must be
    /// registered for `kind`.
    pub fn add(
        ledger: &mut Ledger,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        occurred_at: NaiveDate,
    ) -> Result<u64> {
        let category = category.into();
        Self::validate_category(ledger, kind, &category)?;
        let id = ledger.next_id();
        let transaction = Transaction::new(
            id,
            kind,
            category,
            description,
            round_cents(amount),
            occurred_at,
        );
        transaction.validate()?;
        Ok(ledger.add_transaction(transaction))
    }

    /// Looks up a transaction by id.
    pub fn get(ledger: &Ledger, id: u64) -> Option<&Transaction> {
        ledger.transaction(id)
    }

    /// Applies the supplied fields of `patch` to the transaction `id`.
    ///
    /// Returns `Ok(false)` when the id is unknown. The patch is validated
    /// against a staged copy first, so a rejected update leaves the stored
    /// transaction untouched.
    pub fn update(ledger: &mut Ledger, id: u64, patch: TransactionPatch) -> Result<bool> {
        let Some(current) = ledger.transaction(id) else {
            return Ok(false);
        };

        let mut staged = current.clone();
        if let Some(kind) = patch.kind {
            staged.kind = kind;
        }
        if let Some(category) = patch.category {
            staged.category = category;
        }
        if let Some(description) = patch.description {
            staged.description = description;
        }
        if let Some(amount) = patch.amount {
            staged.amount = round_cents(amount);
        }
        if let Some(occurred_at) = patch.occurred_at {
            staged.occurred_at = occurred_at;
        }
        staged.validate()?;
        Self::validate_category(ledger, staged.kind, &staged.category)?;

        // Invariant checked above: the id exists.
        if let Some(stored) = ledger.transaction_mut(id) {
            *stored = staged;
        }
        ledger.touch();
        Ok(true)
    }

    /// Removes the transaction `id`, returning whether it existed.
    pub fn remove(ledger: &mut Ledger, id: u64) -> bool {
        ledger.remove_transaction(id).is_some()
    }

    /// Empties the whole collection. Destructive; callers must confirm first.
    pub fn clear(ledger: &mut Ledger) {
        ledger.clear_transactions();
    }

    /// Transactions ordered by date, ties broken by ascending id.
    pub fn list_sorted(ledger: &Ledger, descending: bool) -> Vec<Transaction> {
        let mut snapshot = ledger.transactions.clone();
        snapshot.sort_by(|a, b| {
            let by_date = if descending {
                b.occurred_at.cmp(&a.occurred_at)
            } else {
                a.occurred_at.cmp(&b.occurred_at)
            };
            match by_date {
                Ordering::Equal => a.id.cmp(&b.id),
                other => other,
            }
        });
        snapshot
    }

    /// Transactions dated within `start..=end`.
    pub fn filter_by_period(ledger: &Ledger, start: NaiveDate, end: NaiveDate) -> Vec<Transaction> {
        Self::filtered(ledger, |txn| {
            txn.occurred_at >= start && txn.occurred_at <= end
        })
    }

    /// Case-insensitive substring match over descriptions.
    pub fn filter_by_description(ledger: &Ledger, term: &str) -> Vec<Transaction> {
        let needle = term.to_lowercase();
        Self::filtered(ledger, |txn| {
            txn.description.to_lowercase().contains(&needle)
        })
    }

    /// Exact category match.
    pub fn filter_by_category(ledger: &Ledger, category: &str) -> Vec<Transaction> {
        Self::filtered(ledger, |txn| txn.category == category)
    }

    /// Amounts within `min..=max`, inclusive on both bounds.
    pub fn filter_by_amount_range(ledger: &Ledger, min: f64, max: f64) -> Vec<Transaction> {
        Self::filtered(ledger, |txn| txn.amount >= min && txn.amount <= max)
    }

    fn filtered<P>(ledger: &Ledger, predicate: P) -> Vec<Transaction>
    where
        P: Fn(&Transaction) -> bool,
    {
        ledger
            .transactions
            .iter()
            .filter(|txn| predicate(txn))
            .cloned()
            .collect()
    }

    fn validate_category(ledger: &Ledger, kind: TransactionKind, name: &str) -> Result<()> {
        if ledger.categories.contains(kind, name) {
            return Ok(());
        }
        let mut message = format!("unknown {} category `{}`", kind.to_string().to_lowercase(), name);
        if let Some(suggestion) = closest_category(ledger.categories.for_kind(kind), name) {
            message.push_str(&format!(". Did you mean `{suggestion}`?"));
        }
        Err(TrackerError::Validation(message))
    }
}

/// Nearest registered label by normalized Levenshtein similarity.
fn closest_category<'a>(candidates: &'a [String], input: &str) -> Option<&'a str> {
    let wanted = input.trim().to_lowercase();
    candidates
        .iter()
        .map(|name| {
            let score = strsim::normalized_levenshtein(&name.to_lowercase(), &wanted);
            (name, score)
        })
        .filter(|(_, score)| *score >= 0.6)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .map(|(name, _)| name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger_with_samples() -> Ledger {
        let mut ledger = Ledger::new();
        TransactionService::add(
            &mut ledger,
            TransactionKind::Income,
            "Salary",
            "March pay",
            2500.0,
            date(2024, 3, 1),
        )
        .unwrap();
        TransactionService::add(
            &mut ledger,
            TransactionKind::Expense,
            "Food",
            "Groceries",
            120.456,
            date(2024, 3, 5),
        )
        .unwrap();
        TransactionService::add(
            &mut ledger,
            TransactionKind::Expense,
            "Bills",
            "Electricity",
            80.0,
            date(2024, 3, 5),
        )
        .unwrap();
        ledger
    }

    #[test]
    fn add_assigns_sequential_ids_and_rounds_amounts() {
        let ledger = ledger_with_samples();
        let ids: Vec<u64> = ledger.transactions.iter().map(|txn| txn.id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(ledger.transaction(2).unwrap().amount, 120.46);
    }

    #[test]
    fn add_rejects_unknown_category_with_suggestion() {
        let mut ledger = Ledger::new();
        let err = TransactionService::add(
            &mut ledger,
            TransactionKind::Expense,
            "Fod",
            "typo",
            10.0,
            date(2024, 1, 1),
        )
        .expect_err("unknown category must fail");
        let message = format!("{err}");
        assert!(message.contains("Fod"), "unexpected error: {message}");
        assert!(message.contains("Food"), "expected suggestion: {message}");
    }

    #[test]
    fn add_rejects_blank_description() {
        let mut ledger = Ledger::new();
        let err = TransactionService::add(
            &mut ledger,
            TransactionKind::Expense,
            "Food",
            "  ",
            10.0,
            date(2024, 1, 1),
        )
        .expect_err("blank description must fail");
        assert!(matches!(err, TrackerError::Validation(_)));
        assert!(ledger.transactions.is_empty());
    }

    #[test]
    fn get_after_add_returns_equal_fields() {
        let mut ledger = Ledger::new();
        let id = TransactionService::add(
            &mut ledger,
            TransactionKind::Income,
            "Freelance",
            "Site build",
            300.0,
            date(2024, 2, 10),
        )
        .unwrap();
        let txn = TransactionService::get(&ledger, id).expect("added transaction");
        assert_eq!(txn.kind, TransactionKind::Income);
        assert_eq!(txn.category, "Freelance");
        assert_eq!(txn.description, "Site build");
        assert_eq!(txn.amount, 300.0);
        assert_eq!(txn.occurred_at, date(2024, 2, 10));
    }

    #[test]
    fn update_applies_only_supplied_fields() {
        let mut ledger = ledger_with_samples();
        let before = ledger.transaction(2).unwrap().clone();
        let changed = TransactionService::update(
            &mut ledger,
            2,
            TransactionPatch {
                amount: Some(99.999),
                description: Some("Weekly groceries".into()),
                ..TransactionPatch::default()
            },
        )
        .unwrap();
        assert!(changed);
        let after = ledger.transaction(2).unwrap();
        assert_eq!(after.amount, 100.0);
        assert_eq!(after.description, "Weekly groceries");
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.category, before.category);
        assert_eq!(after.occurred_at, before.occurred_at);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn update_returns_false_for_unknown_id() {
        let mut ledger = ledger_with_samples();
        let changed =
            TransactionService::update(&mut ledger, 99, TransactionPatch::default()).unwrap();
        assert!(!changed);
    }

    #[test]
    fn rejected_update_leaves_transaction_untouched() {
        let mut ledger = ledger_with_samples();
        let before = ledger.transaction(2).unwrap().clone();
        let err = TransactionService::update(
            &mut ledger,
            2,
            TransactionPatch {
                amount: Some(-1.0),
                description: Some("should not stick".into()),
                ..TransactionPatch::default()
            },
        )
        .expect_err("negative amount must fail");
        assert!(matches!(err, TrackerError::Validation(_)));
        assert_eq!(ledger.transaction(2).unwrap(), &before);
    }

    #[test]
    fn empty_patch_is_a_successful_no_op() {
        let mut ledger = ledger_with_samples();
        let before = ledger.transaction(1).unwrap().clone();
        assert!(TransactionService::update(&mut ledger, 1, TransactionPatch::default()).unwrap());
        assert_eq!(ledger.transaction(1).unwrap(), &before);
    }

    #[test]
    fn remove_reports_presence() {
        let mut ledger = ledger_with_samples();
        assert!(TransactionService::remove(&mut ledger, 1));
        assert!(!TransactionService::remove(&mut ledger, 1));
        assert_eq!(ledger.transaction_count(), 2);
    }

    #[test]
    fn ids_stay_monotonic_after_removing_the_highest() {
        let mut ledger = ledger_with_samples();
        assert!(TransactionService::remove(&mut ledger, 3));
        let id = TransactionService::add(
            &mut ledger,
            TransactionKind::Expense,
            "Leisure",
            "Cinema",
            25.0,
            date(2024, 3, 9),
        )
        .unwrap();
        assert_eq!(id, 4);
    }

    #[test]
    fn clear_empties_the_collection() {
        let mut ledger = ledger_with_samples();
        TransactionService::clear(&mut ledger);
        assert!(TransactionService::list_sorted(&ledger, true).is_empty());
    }

    #[test]
    fn list_sorted_orders_by_date_then_id() {
        let ledger = ledger_with_samples();
        let desc: Vec<u64> = TransactionService::list_sorted(&ledger, true)
            .iter()
            .map(|txn| txn.id)
            .collect();
        // Two transactions share 2024-03-05; the tie keeps ascending ids.
        assert_eq!(desc, [2, 3, 1]);
        let asc: Vec<u64> = TransactionService::list_sorted(&ledger, false)
            .iter()
            .map(|txn| txn.id)
            .collect();
        assert_eq!(asc, [1, 2, 3]);
    }

    #[test]
    fn filter_by_period_is_inclusive() {
        let ledger = ledger_with_samples();
        let hits = TransactionService::filter_by_period(&ledger, date(2024, 3, 1), date(2024, 3, 5));
        assert_eq!(hits.len(), 3);
        let narrow =
            TransactionService::filter_by_period(&ledger, date(2024, 3, 2), date(2024, 3, 4));
        assert!(narrow.is_empty());
    }

    #[test]
    fn filter_by_description_ignores_case() {
        let ledger = ledger_with_samples();
        let hits = TransactionService::filter_by_description(&ledger, "GROCER");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn filter_by_category_is_exact() {
        let ledger = ledger_with_samples();
        assert_eq!(TransactionService::filter_by_category(&ledger, "Food").len(), 1);
        assert!(TransactionService::filter_by_category(&ledger, "food").is_empty());
    }

    #[test]
    fn filter_by_amount_range_includes_both_bounds() {
        let ledger = ledger_with_samples();
        let hits = TransactionService::filter_by_amount_range(&ledger, 80.0, 120.46);
        let ids: Vec<u64> = hits.iter().map(|txn| txn.id).collect();
        assert_eq!(ids, [2, 3]);
        let exact = TransactionService::filter_by_amount_range(&ledger, 80.0, 80.0);
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].id, 3);
    }
}
