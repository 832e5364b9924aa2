pub mod category_service;
pub mod transaction_service;

pub use category_service::CategoryService;
pub use transaction_service::TransactionService;
