//! The owned application state: both collections plus their snapshot store.
use crate::core::goal::{Goal, GoalStore};
use crate::core::transaction::{Transaction, TransactionKind, TransactionStore};
use crate::store::{GOALS_KEY, SnapshotStore, TRANSACTIONS_KEY};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

/// Holds the transaction and goal stores and mirrors each of them to the
/// snapshot store after every successful mutation.
///
/// A rejected operation performs no write. If a write fails the in-memory
/// state is kept and the error is returned; the next successful write
/// brings the durable copy back in line.
pub struct Ledger<S: SnapshotStore> {
    store: S,
    transactions: TransactionStore,
    goals: GoalStore,
}

impl<S: SnapshotStore> Ledger<S> {
    /// Loads both collections from `store`. Missing keys load as empty.
    pub fn open(store: S) -> Result<Self> {
        let transactions: Vec<Transaction> = load_snapshot(&store, TRANSACTIONS_KEY)?;
        let goals: Vec<Goal> = load_snapshot(&store, GOALS_KEY)?;
        info!(
            transactions = transactions.len(),
            goals = goals.len(),
            "Ledger loaded"
        );

        Ok(Self {
            store,
            transactions: TransactionStore::from_snapshot(transactions),
            goals: GoalStore::from_snapshot(goals),
        })
    }

    pub fn transactions(&self) -> &TransactionStore {
        &self.transactions
    }

    pub fn goals(&self) -> &GoalStore {
        &self.goals
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn add_transaction(
        &mut self,
        description: &str,
        amount: Decimal,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Result<Transaction> {
        let added = self
            .transactions
            .add(description, amount, date, kind)?
            .clone();
        self.persist_transactions()?;
        Ok(added)
    }

    /// Removes a transaction and persists, even when `id` was not present.
    pub fn remove_transaction(&mut self, id: i64) -> Result<bool> {
        let removed = self.transactions.remove(id);
        self.persist_transactions()?;
        Ok(removed)
    }

    pub fn add_goal(
        &mut self,
        description: &str,
        target: Decimal,
        due_date: NaiveDate,
    ) -> Result<Goal> {
        let added = self.goals.add(description, target, due_date)?.clone();
        self.persist_goals()?;
        Ok(added)
    }

    pub fn contribute(&mut self, id: i64, amount: Decimal) -> Result<Goal> {
        let updated = self.goals.contribute(id, amount)?.clone();
        self.persist_goals()?;
        Ok(updated)
    }

    /// Empties both collections and deletes both snapshots in one batch.
    pub fn clear(&mut self) -> Result<()> {
        self.transactions.clear();
        self.goals.clear();
        self.store
            .remove_all(&[TRANSACTIONS_KEY, GOALS_KEY])
            .context("Failed to clear stored snapshots")?;
        info!("Cleared all transactions and goals");
        Ok(())
    }

    fn persist_transactions(&mut self) -> Result<()> {
        save_snapshot(&mut self.store, TRANSACTIONS_KEY, self.transactions.list())
    }

    fn persist_goals(&mut self) -> Result<()> {
        save_snapshot(&mut self.store, GOALS_KEY, self.goals.list())
    }
}

fn load_snapshot<S: SnapshotStore, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Vec<T>> {
    match store.read(key)? {
        Some(bytes) => serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse stored snapshot {key}")),
        None => {
            debug!(key, "No snapshot stored, starting empty");
            Ok(Vec::new())
        }
    }
}

fn save_snapshot<S: SnapshotStore, T: Serialize>(
    store: &mut S,
    key: &str,
    items: &[T],
) -> Result<()> {
    let bytes = serde_json::to_vec(items)?;
    store
        .write(key, bytes)
        .with_context(|| format!("Failed to persist snapshot {key}"))
}
