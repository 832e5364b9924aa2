//! The tracker session: one ledger, one storage collaborator, no globals.

use chrono::NaiveDate;
use tracing::warn;

use crate::core::services::{CategoryService, TransactionService};
use crate::domain::ledger::Ledger;
use crate::domain::transaction::{Transaction, TransactionKind, TransactionPatch};
use crate::errors::Result;
use crate::storage::StorageBackend;

/// Owns the in-memory ledger for a session and saves after every mutation.
///
/// When a save fails the mutation is kept in memory and the storage error is
/// returned, so callers can report it and retry [`FinanceTracker::save`]
/// without redoing the edit.
pub struct FinanceTracker {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
}

impl FinanceTracker {
    /// Loads the ledger once at startup. Load failures fall back to a fresh
    /// ledger with default categories; startup never aborts over a bad file.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let ledger = storage.load().unwrap_or_else(|err| {
            warn!(%err, "could not load ledger, starting empty with default categories");
            Ledger::new()
        });
        Self { ledger, storage }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Persists the current in-memory state. Safe to retry after a failure.
    pub fn save(&self) -> Result<()> {
        self.storage.save(&self.ledger)
    }

    /// Adds a transaction and persists, returning the stored record.
    pub fn add(
        &mut self,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        occurred_at: NaiveDate,
    ) -> Result<Transaction> {
        let id = TransactionService::add(
            &mut self.ledger,
            kind,
            category,
            description,
            amount,
            occurred_at,
        )?;
        let stored = self
            .ledger
            .transaction(id)
            .cloned()
            .expect("just-added transaction is present");
        self.save()?;
        Ok(stored)
    }

    pub fn get(&self, id: u64) -> Option<&Transaction> {
        TransactionService::get(&self.ledger, id)
    }

    /// Patches a transaction and persists. `Ok(false)` when the id is unknown.
    pub fn update(&mut self, id: u64, patch: TransactionPatch) -> Result<bool> {
        if !TransactionService::update(&mut self.ledger, id, patch)? {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Deletes a transaction and persists. `Ok(false)` when the id is unknown.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        if !TransactionService::remove(&mut self.ledger, id) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Empties the ledger and persists. Destructive and irreversible; the
    /// caller must have confirmed with the user first.
    pub fn clear(&mut self) -> Result<()> {
        TransactionService::clear(&mut self.ledger);
        self.save()
    }

    /// Registers a category and persists when something changed.
    pub fn add_category(&mut self, kind: TransactionKind, name: &str) -> Result<bool> {
        if !CategoryService::add(&mut self.ledger, kind, name) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Unregisters a category and persists when something changed.
    pub fn remove_category(&mut self, kind: TransactionKind, name: &str) -> Result<bool> {
        if !CategoryService::remove(&mut self.ledger, kind, name) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TrackerError;
    use std::sync::{Arc, Mutex};

    /// In-memory backend with a switchable failure mode for save.
    #[derive(Default)]
    struct MemoryStorage {
        snapshot: Mutex<Option<Ledger>>,
        fail_saves: Mutex<bool>,
    }

    impl MemoryStorage {
        fn set_fail_saves(&self, fail: bool) {
            *self.fail_saves.lock().unwrap() = fail;
        }
    }

    impl StorageBackend for Arc<MemoryStorage> {
        fn load(&self) -> Result<Ledger> {
            Ok(self
                .snapshot
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(Ledger::new))
        }

        fn save(&self, ledger: &Ledger) -> Result<()> {
            if *self.fail_saves.lock().unwrap() {
                return Err(TrackerError::Storage("disk full".into()));
            }
            *self.snapshot.lock().unwrap() = Some(ledger.clone());
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_persists_and_returns_the_stored_record() {
        let storage = Arc::new(MemoryStorage::default());
        let mut tracker = FinanceTracker::open(Box::new(storage.clone()));
        let txn = tracker
            .add(
                TransactionKind::Expense,
                "Food",
                "Groceries",
                55.555,
                date(2024, 4, 2),
            )
            .unwrap();
        assert_eq!(txn.id, 1);
        assert_eq!(txn.amount, 55.56);
        assert_eq!(tracker.get(1).unwrap(), &txn);
        let persisted = storage.snapshot.lock().unwrap().clone().unwrap();
        assert_eq!(persisted.transaction_count(), 1);
    }

    #[test]
    fn failed_save_keeps_the_mutation_and_allows_retry() {
        let storage = Arc::new(MemoryStorage::default());
        let mut tracker = FinanceTracker::open(Box::new(storage.clone()));
        storage.set_fail_saves(true);

        let err = tracker
            .add(
                TransactionKind::Income,
                "Salary",
                "Pay",
                100.0,
                date(2024, 1, 1),
            )
            .expect_err("save failure must surface");
        assert!(matches!(err, TrackerError::Storage(_)));
        // The edit is not lost.
        assert_eq!(tracker.ledger().transaction_count(), 1);

        storage.set_fail_saves(false);
        tracker.save().expect("retry succeeds without redoing the add");
        let persisted = storage.snapshot.lock().unwrap().clone().unwrap();
        assert_eq!(persisted.transaction_count(), 1);
    }

    #[test]
    fn remove_of_unknown_id_is_not_an_error() {
        let mut tracker = FinanceTracker::open(Box::new(Arc::new(MemoryStorage::default())));
        assert!(!tracker.remove(404).unwrap());
    }

    #[test]
    fn clear_then_reload_yields_an_empty_ledger() {
        let storage = Arc::new(MemoryStorage::default());
        let mut tracker = FinanceTracker::open(Box::new(storage.clone()));
        tracker
            .add(
                TransactionKind::Income,
                "Salary",
                "Pay",
                100.0,
                date(2024, 1, 1),
            )
            .unwrap();
        tracker.clear().unwrap();
        assert_eq!(tracker.ledger().transaction_count(), 0);

        let reloaded = FinanceTracker::open(Box::new(storage));
        assert_eq!(reloaded.ledger().transaction_count(), 0);
    }

    #[test]
    fn open_falls_back_to_defaults_when_load_fails() {
        struct BrokenStorage;
        impl StorageBackend for BrokenStorage {
            fn load(&self) -> Result<Ledger> {
                Err(TrackerError::Storage("corrupt file".into()))
            }
            fn save(&self, _ledger: &Ledger) -> Result<()> {
                Ok(())
            }
        }

        let tracker = FinanceTracker::open(Box::new(BrokenStorage));
        assert_eq!(tracker.ledger().transaction_count(), 0);
        assert!(!tracker
            .ledger()
            .categories
            .for_kind(TransactionKind::Expense)
            .is_empty());
    }
}
