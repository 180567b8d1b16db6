//! Input validation failures.
//!
//! A rejected operation never mutates a store and never writes a snapshot.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Amount is not a number: {0:?}")]
    InvalidAmount(String),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Date is required")]
    MissingDate,

    #[error("Date must be in YYYY-MM-DD format, got {0:?}")]
    InvalidDate(String),

    #[error("Amount {0} would overflow the recorded total")]
    TotalOverflow(Decimal),

    #[error("Goal not found: {0}")]
    GoalNotFound(i64),
}
