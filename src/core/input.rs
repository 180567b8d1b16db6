//! Parsing of user supplied amounts, dates and descriptions.
use crate::core::error::ValidationError;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strictly positive decimal amount. Accepts plain (`12.50`) and
/// scientific (`1.25e1`) notation.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::InvalidAmount(input.to_string()))?;
    ensure_positive(amount)
}

pub fn ensure_positive(amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

/// Parses an ISO 8601 calendar date. Blank input counts as a missing date.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

pub fn normalize_description(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

/// Returns a creation-timestamp id that is strictly greater than every id in
/// `existing`.
pub fn next_id(existing: impl IntoIterator<Item = i64>) -> i64 {
    let now = Utc::now().timestamp_millis();
    match existing.into_iter().max() {
        Some(last) if last >= now => last + 1,
        _ => now,
    }
}
