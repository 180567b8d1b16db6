use crate::core::Ledger;
use crate::store::SnapshotStore;
use anyhow::{Context, Result};
use console::Term;

const PROMPT: &str = "Clear all transactions and goals? [y/N] ";

/// Empties the ledger once the user has confirmed, either up front with
/// `confirmed` or interactively on the terminal.
pub fn run<S: SnapshotStore>(ledger: &mut Ledger<S>, confirmed: bool) -> Result<String> {
    if !confirmed && !ask_confirmation()? {
        return Ok("Nothing cleared".to_string());
    }
    clear(ledger)
}

fn clear<S: SnapshotStore>(ledger: &mut Ledger<S>) -> Result<String> {
    let (transactions, goals) = (ledger.transactions().len(), ledger.goals().len());
    ledger.clear()?;
    Ok(format!(
        "Cleared {transactions} transactions and {goals} goals"
    ))
}

fn ask_confirmation() -> Result<bool> {
    let term = Term::stderr();
    if !term.is_term() {
        anyhow::bail!("Refusing to clear without confirmation; pass --yes to confirm");
    }
    term.write_str(PROMPT)?;
    let answer = term.read_line().context("Failed to read confirmation")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
