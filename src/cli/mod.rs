//! Terminal presentation of ledger state and aggregates.

pub mod clear;
pub mod goals;
pub mod setup;
pub mod summary;
pub mod transactions;
pub mod trend;
pub mod ui;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// How read-only commands render their result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Resolves an optional user supplied date, defaulting to today.
pub(crate) fn date_or_today(input: Option<&str>) -> Result<NaiveDate> {
    match input {
        Some(text) => Ok(crate::core::input::parse_date(text)?),
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ValidationError;

    #[test]
    fn test_date_or_today() {
        assert_eq!(
            date_or_today(Some("2024-05-06")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
        );
        assert_eq!(date_or_today(None).unwrap(), Local::now().date_naive());

        let err = date_or_today(Some("")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingDate)
        );
    }
}
