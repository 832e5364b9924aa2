//! Pure domain models: transactions, categories, and the ledger container.
//! No I/O, no CLI, no storage. Only data types and their invariants.

pub mod category;
pub mod ledger;
pub mod transaction;

pub use category::CategoryRegistry;
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionKind, TransactionPatch};
