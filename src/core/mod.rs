//! Business logic: CRUD services, the report engine, and the session tracker.

pub mod reports;
pub mod services;
pub mod tracker;

pub use services::{CategoryService, TransactionService};
pub use tracker::FinanceTracker;
