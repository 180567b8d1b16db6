//! Income and expense records and the store that owns them.
use crate::core::error::ValidationError;
use crate::core::input::{ensure_positive, next_id, normalize_description};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransactionKind::Income => "income",
                TransactionKind::Expense => "expense",
            }
        )
    }
}

/// A single recorded income or expense event. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    id: i64,
    #[serde(rename = "desc")]
    description: String,
    amount: Decimal,
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransactionKind,
}

/// Snapshot shape of a transaction, checked before it becomes a `Transaction`.
#[derive(Deserialize)]
struct TransactionRecord {
    id: i64,
    #[serde(rename = "desc")]
    description: String,
    amount: Decimal,
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransactionKind,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ValidationError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::new(
            record.id,
            &record.description,
            record.amount,
            record.date,
            record.kind,
        )
    }
}

impl Transaction {
    pub fn new(
        id: i64,
        description: &str,
        amount: Decimal,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            description: normalize_description(description)?,
            amount: ensure_positive(amount)?,
            date,
            kind,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Amount with its effect on the balance: positive for income, negative
    /// for expense.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// In-memory list of transactions in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionStore {
    items: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(items: Vec<Transaction>) -> Self {
        Self { items }
    }

    /// Validates and appends a new transaction with a fresh id.
    ///
    /// The income and expense totals must stay representable, otherwise the
    /// transaction is rejected with [`ValidationError::TotalOverflow`].
    pub fn add(
        &mut self,
        description: &str,
        amount: Decimal,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Result<&Transaction, ValidationError> {
        let id = next_id(self.items.iter().map(Transaction::id));
        let transaction = Transaction::new(id, description, amount, date, kind)?;
        self.items
            .iter()
            .filter(|t| t.kind == kind)
            .try_fold(amount, |total, t| total.checked_add(t.amount))
            .ok_or(ValidationError::TotalOverflow(amount))?;
        debug!(id, %kind, %amount, "Adding transaction");
        self.items.push(transaction);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes the transaction with `id`. Returns false if there was none.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        let removed = self.items.len() != before;
        debug!(id, removed, "Removing transaction");
        removed
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn list(&self) -> &[Transaction] {
        &self.items
    }

    /// Transactions sorted by date, latest first. Same-day entries keep
    /// insertion order.
    pub fn newest_first(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.items.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
