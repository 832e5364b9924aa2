//! The ledger: the full set of transactions and categories, persisted as one unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::CategoryRegistry;
use crate::domain::transaction::Transaction;

const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: CategoryRegistry,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Highest transaction id ever assigned. Ids are drawn from here so a
    /// deleted id is never handed out again, even when it was the maximum.
    #[serde(default)]
    last_id: u64,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            transactions: Vec::new(),
            categories: CategoryRegistry::default(),
            created_at: now,
            updated_at: now,
            last_id: 0,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Next free transaction id: `max(existing) + 1`, monotonic across deletes.
    pub fn next_id(&mut self) -> u64 {
        let max_existing = self
            .transactions
            .iter()
            .map(|txn| txn.id)
            .max()
            .unwrap_or(0);
        self.last_id = self.last_id.max(max_existing) + 1;
        self.last_id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> u64 {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: u64) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn remove_transaction(&mut self, id: u64) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
        self.touch();
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Repairs invariants after deserializing a stored snapshot: the id
    /// counter must never sit below an id already present in the file.
    pub fn normalize(&mut self) {
        let max_existing = self
            .transactions
            .iter()
            .map(|txn| txn.id)
            .max()
            .unwrap_or(0);
        self.last_id = self.last_id.max(max_existing);
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
