//! Provides aggregations over recorded transactions.
//!
//! Every function here is pure and total. Values are returned as raw
//! `Decimal`s; formatting for display belongs to the caller.
use crate::core::transaction::{Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

/// Income and expense sums over a set of transactions.
///
/// Sums saturate at `Decimal::MAX`, so `balance` never overflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl Totals {
    /// Income as a whole percentage of all money moved, or `None` when
    /// nothing has been recorded.
    pub fn income_ratio(&self) -> Option<Decimal> {
        let (income, total) = match self.income.checked_add(self.expense) {
            Some(total) => (self.income, total),
            // Scaled down so the sum fits; the ratio is unchanged.
            None => (
                self.income / Decimal::TEN,
                self.income / Decimal::TEN + self.expense / Decimal::TEN,
            ),
        };
        if total.is_zero() {
            return None;
        }
        Some(
            (income / total * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

/// Balance after replaying every transaction up to and including `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    /// `YYYY-MM`
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
}

impl MonthlySummary {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let (income, expense) =
        transactions
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(income, expense), t| {
                match t.kind() {
                    TransactionKind::Income => (income.saturating_add(t.amount()), expense),
                    TransactionKind::Expense => (income, expense.saturating_add(t.amount())),
                }
            });
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Cumulative balance, one point per transaction, replayed by date and then
/// by id so that same-day entries follow creation order.
pub fn running_balance(transactions: &[Transaction]) -> Vec<BalancePoint> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|t| (t.date(), t.id()));

    let mut balance = Decimal::ZERO;
    ordered
        .into_iter()
        .map(|t| {
            balance = balance.saturating_add(t.signed_amount());
            BalancePoint {
                date: t.date(),
                balance,
            }
        })
        .collect()
}

/// Income and expense per calendar month, oldest month first.
pub fn monthly_rollup(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut buckets: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let bucket = buckets
            .entry(t.date().format("%Y-%m").to_string())
            .or_default();
        match t.kind() {
            TransactionKind::Income => bucket.0 = bucket.0.saturating_add(t.amount()),
            TransactionKind::Expense => bucket.1 = bucket.1.saturating_add(t.amount()),
        }
    }

    buckets
        .into_iter()
        .map(|(month, (income, expense))| MonthlySummary {
            month,
            income,
            expense,
        })
        .collect()
}
