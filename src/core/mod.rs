//! Core business logic: records, stores, aggregations and configuration

pub mod analytics;
pub mod config;
pub mod error;
pub mod goal;
pub mod input;
pub mod ledger;
pub mod log;
pub mod transaction;

// Re-export main types for cleaner imports
pub use error::ValidationError;
pub use goal::{Goal, GoalStore};
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionKind, TransactionStore};
