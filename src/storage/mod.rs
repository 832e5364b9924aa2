pub mod json_backend;

use crate::domain::ledger::Ledger;
use crate::errors::Result;

/// Abstraction over persistence backends capable of storing a ledger.
///
/// The ledger is the unit of persistence: loaded wholesale, saved wholesale,
/// last write wins.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<Ledger>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
}

pub use json_backend::JsonStorage;
