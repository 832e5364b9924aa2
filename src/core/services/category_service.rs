//! Business logic helpers for category management.

use crate::domain::ledger::Ledger;
use crate::domain::transaction::TransactionKind;

/// Thin validated wrapper over the ledger's category registry.
///
/// Mutations report success as a bool; removing a category does not rewrite
/// transactions that already reference it.
pub struct CategoryService;

impl CategoryService {
    /// Categories registered for `kind`, in insertion order.
    pub fn list(ledger: &Ledger, kind: TransactionKind) -> Vec<String> {
        ledger.categories.for_kind(kind).to_vec()
    }

    /// Registers a new category, returning `false` on duplicate or blank name.
    pub fn add(ledger: &mut Ledger, kind: TransactionKind, name: &str) -> bool {
        let added = ledger.categories.add(kind, name);
        if added {
            ledger.touch();
        }
        added
    }

    /// Unregisters a category, returning `false` when it was not present.
    pub fn remove(ledger: &mut Ledger, kind: TransactionKind, name: &str) -> bool {
        let removed = ledger.categories.remove(kind, name);
        if removed {
            ledger.touch();
        }
        removed
    }
}
