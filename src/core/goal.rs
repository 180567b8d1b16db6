//! Savings goals and the store that owns them.
use crate::core::error::ValidationError;
use crate::core::input::{ensure_positive, next_id, normalize_description};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A savings target with a running contributed amount.
///
/// `saved` only ever grows through [`Goal::contribute`] and is clamped at
/// `target`, so `0 <= saved <= target` holds for every live value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GoalRecord")]
pub struct Goal {
    id: i64,
    #[serde(rename = "desc")]
    description: String,
    target: Decimal,
    #[serde(rename = "date")]
    due_date: NaiveDate,
    saved: Decimal,
}

#[derive(Deserialize)]
struct GoalRecord {
    id: i64,
    #[serde(rename = "desc")]
    description: String,
    target: Decimal,
    #[serde(rename = "date")]
    due_date: NaiveDate,
    #[serde(default)]
    saved: Decimal,
}

impl TryFrom<GoalRecord> for Goal {
    type Error = ValidationError;

    fn try_from(record: GoalRecord) -> Result<Self, Self::Error> {
        let mut goal = Goal::new(
            record.id,
            &record.description,
            record.target,
            record.due_date,
        )?;
        if record.saved < Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(record.saved));
        }
        goal.saved = record.saved.min(goal.target);
        Ok(goal)
    }
}

impl Goal {
    pub fn new(
        id: i64,
        description: &str,
        target: Decimal,
        due_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            description: normalize_description(description)?,
            target: ensure_positive(target)?,
            due_date,
            saved: Decimal::ZERO,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn target(&self) -> Decimal {
        self.target
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn saved(&self) -> Decimal {
        self.saved
    }

    /// Adds `amount` to the saved total, capped at the target.
    pub fn contribute(&mut self, amount: Decimal) -> Result<(), ValidationError> {
        let amount = ensure_positive(amount)?;
        // An overflowing sum is necessarily past the target.
        self.saved = self
            .saved
            .checked_add(amount)
            .map_or(self.target, |sum| sum.min(self.target));
        Ok(())
    }

    /// Share of the target saved so far, in percent, capped at 100.
    pub fn progress_percent(&self) -> Decimal {
        (self.saved / self.target * HUNDRED).min(HUNDRED)
    }

    pub fn is_reached(&self) -> bool {
        self.progress_percent() >= HUNDRED
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GoalStore {
    items: Vec<Goal>,
}

impl GoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(items: Vec<Goal>) -> Self {
        Self { items }
    }

    /// Validates and appends a new goal with nothing saved yet.
    pub fn add(
        &mut self,
        description: &str,
        target: Decimal,
        due_date: NaiveDate,
    ) -> Result<&Goal, ValidationError> {
        let id = next_id(self.items.iter().map(Goal::id));
        let goal = Goal::new(id, description, target, due_date)?;
        debug!(id, %target, "Adding goal");
        self.items.push(goal);
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn contribute(&mut self, id: i64, amount: Decimal) -> Result<&Goal, ValidationError> {
        let amount = ensure_positive(amount)?;
        let goal = self
            .items
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(ValidationError::GoalNotFound(id))?;
        goal.contribute(amount)?;
        debug!(id, %amount, saved = %goal.saved, "Contributed to goal");
        Ok(&*goal)
    }

    pub fn get(&self, id: i64) -> Option<&Goal> {
        self.items.iter().find(|g| g.id == id)
    }

    pub fn list(&self) -> &[Goal] {
        &self.items
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
