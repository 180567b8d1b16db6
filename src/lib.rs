pub mod cli;
pub mod core;
pub mod store;

use crate::cli::OutputFormat;
use crate::core::config::AppConfig;
use crate::core::{Ledger, TransactionKind};
use crate::store::{DiskStore, SnapshotStore};
use anyhow::Result;
use tracing::debug;

/// A single ledger operation requested by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    AddTransaction {
        kind: TransactionKind,
        description: String,
        amount: String,
        date: Option<String>,
    },
    RemoveTransaction {
        id: i64,
    },
    ListTransactions {
        format: OutputFormat,
    },
    AddGoal {
        description: String,
        target: String,
        due: Option<String>,
    },
    Contribute {
        id: i64,
        amount: String,
    },
    ListGoals {
        format: OutputFormat,
    },
    Summary {
        format: OutputFormat,
    },
    Balance {
        format: OutputFormat,
    },
    Monthly {
        format: OutputFormat,
    },
    Clear {
        confirmed: bool,
    },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Opens the on-disk ledger named by the config and runs `command` against it.
pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let mut ledger = Ledger::open(DiskStore::open(&config.ledger_path()?)?)?;
    let output = execute(&mut ledger, command, &config.currency)?;
    println!("{output}");
    Ok(())
}

/// Runs `command` against an already opened ledger and returns the text to show.
pub fn execute<S: SnapshotStore>(
    ledger: &mut Ledger<S>,
    command: AppCommand,
    currency: &str,
) -> Result<String> {
    debug!(?command, "Executing command");
    match command {
        AppCommand::AddTransaction {
            kind,
            description,
            amount,
            date,
        } => cli::transactions::add(
            ledger,
            kind,
            &description,
            &amount,
            date.as_deref(),
            currency,
        ),
        AppCommand::RemoveTransaction { id } => cli::transactions::remove(ledger, id),
        AppCommand::ListTransactions { format } => {
            cli::transactions::render(ledger.transactions(), format, currency)
        }
        AppCommand::AddGoal {
            description,
            target,
            due,
        } => cli::goals::add(ledger, &description, &target, due.as_deref(), currency),
        AppCommand::Contribute { id, amount } => {
            cli::goals::contribute(ledger, id, &amount, currency)
        }
        AppCommand::ListGoals { format } => cli::goals::render(ledger.goals(), format, currency),
        AppCommand::Summary { format } => {
            cli::summary::render(ledger.transactions().list(), format, currency)
        }
        AppCommand::Balance { format } => {
            cli::trend::render_balance(ledger.transactions().list(), format, currency)
        }
        AppCommand::Monthly { format } => {
            cli::trend::render_monthly(ledger.transactions().list(), format, currency)
        }
        AppCommand::Clear { confirmed } => cli::clear::run(ledger, confirmed),
    }
}
