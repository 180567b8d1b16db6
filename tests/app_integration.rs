use budgetflow::cli::OutputFormat;
use budgetflow::core::analytics::{self, BalancePoint};
use budgetflow::core::{Ledger, TransactionKind, ValidationError};
use budgetflow::store::{DiskStore, GOALS_KEY, SnapshotStore, TRANSACTIONS_KEY};
use budgetflow::{AppCommand, run_command};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracing::info;

mod test_utils {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Writes a config pointing the ledger at `data_dir` and returns its path.
    pub fn write_config(dir: &Path, data_dir: &Path) -> PathBuf {
        let config_path = dir.join("config.yaml");
        let config_content = format!(
            r#"
currency: "Rs"
data_path: '{}'
"#,
            data_dir.display()
        );
        fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

fn add_transaction(kind: TransactionKind, description: &str, amount: &str, date: &str) -> AppCommand {
    AppCommand::AddTransaction {
        kind,
        description: description.to_string(),
        amount: amount.to_string(),
        date: Some(date.to_string()),
    }
}

fn open_ledger(data_dir: &Path) -> Ledger<DiskStore> {
    Ledger::open(DiskStore::open(&data_dir.join("ledger")).unwrap()).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test_log::test]
fn test_full_app_flow_with_disk_store() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    let config_path = test_utils::write_config(temp_dir.path(), &data_dir);
    let config = config_path.to_str();

    for command in [
        add_transaction(TransactionKind::Income, "Salary", "1000", "2024-01-01"),
        add_transaction(TransactionKind::Expense, "Rent", "300", "2024-01-02"),
        AppCommand::AddGoal {
            description: "Bike".to_string(),
            target: "500".to_string(),
            due: Some("2024-12-31".to_string()),
        },
        AppCommand::Summary {
            format: OutputFormat::Table,
        },
        AppCommand::Monthly {
            format: OutputFormat::Json,
        },
    ] {
        let result = run_command(command, config);
        assert!(result.is_ok(), "Command failed with: {:?}", result.err());
    }

    let goal_id = open_ledger(&data_dir).goals().list()[0].id();
    for amount in ["200", "400"] {
        run_command(
            AppCommand::Contribute {
                id: goal_id,
                amount: amount.to_string(),
            },
            config,
        )
        .unwrap();
    }

    let ledger = open_ledger(&data_dir);
    info!(
        transactions = ledger.transactions().len(),
        "Reopened ledger"
    );

    let totals = analytics::totals(ledger.transactions().list());
    assert_eq!(totals.income, dec!(1000));
    assert_eq!(totals.expense, dec!(300));
    assert_eq!(totals.balance, dec!(700));
    assert_eq!(
        analytics::running_balance(ledger.transactions().list()),
        vec![
            BalancePoint {
                date: date("2024-01-01"),
                balance: dec!(1000),
            },
            BalancePoint {
                date: date("2024-01-02"),
                balance: dec!(700),
            },
        ]
    );
    assert_eq!(ledger.goals().get(goal_id).unwrap().saved(), dec!(500));
}

#[test_log::test]
fn test_rejected_command_leaves_store_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    let config_path = test_utils::write_config(temp_dir.path(), &data_dir);
    let config = config_path.to_str();

    let result = run_command(
        add_transaction(TransactionKind::Expense, "Lunch", "-12", "2024-01-01"),
        config,
    );
    let err = result.expect_err("negative amount should be rejected");
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::NonPositiveAmount(dec!(-12)))
    );

    let store = DiskStore::open(&data_dir.join("ledger")).unwrap();
    assert!(store.read(TRANSACTIONS_KEY).unwrap().is_none());
}

#[test_log::test]
fn test_huge_amounts_are_rejected_before_totals_overflow() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    let config_path = test_utils::write_config(temp_dir.path(), &data_dir);
    let config = config_path.to_str();
    let huge = "50000000000000000000000000000";

    run_command(
        add_transaction(TransactionKind::Income, "Windfall", huge, "2024-01-01"),
        config,
    )
    .unwrap();
    let err = run_command(
        add_transaction(TransactionKind::Income, "Windfall", huge, "2024-01-02"),
        config,
    )
    .expect_err("second windfall should overflow the income total");
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::TotalOverflow(dec!(50000000000000000000000000000)))
    );
    assert_eq!(open_ledger(&data_dir).transactions().len(), 1);

    for command in [
        AppCommand::Summary {
            format: OutputFormat::Json,
        },
        AppCommand::Balance {
            format: OutputFormat::Table,
        },
        AppCommand::Monthly {
            format: OutputFormat::Table,
        },
    ] {
        let result = run_command(command, config);
        assert!(result.is_ok(), "Command failed with: {:?}", result.err());
    }
}

#[test_log::test]
fn test_remove_and_clear() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    let config_path = test_utils::write_config(temp_dir.path(), &data_dir);
    let config = config_path.to_str();

    run_command(
        add_transaction(TransactionKind::Income, "Gift", "50", "2024-02-01"),
        config,
    )
    .unwrap();
    run_command(
        add_transaction(TransactionKind::Expense, "Book", "20", "2024-02-03"),
        config,
    )
    .unwrap();

    let first_id = open_ledger(&data_dir).transactions().list()[0].id();
    run_command(AppCommand::RemoveTransaction { id: first_id }, config).unwrap();
    // Removing again is a no-op, not an error.
    run_command(AppCommand::RemoveTransaction { id: first_id }, config).unwrap();

    let ledger = open_ledger(&data_dir);
    assert_eq!(ledger.transactions().len(), 1);
    assert_eq!(ledger.transactions().list()[0].description(), "Book");
    drop(ledger);

    run_command(AppCommand::Clear { confirmed: true }, config).unwrap();

    let store = DiskStore::open(&data_dir.join("ledger")).unwrap();
    assert!(store.read(TRANSACTIONS_KEY).unwrap().is_none());
    assert!(store.read(GOALS_KEY).unwrap().is_none());
}

#[test_log::test]
fn test_loads_legacy_browser_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    {
        let mut store = DiskStore::open(&data_dir.join("ledger")).unwrap();
        store
            .write(
                TRANSACTIONS_KEY,
                br#"[{"id":1704067200000,"desc":"Salary","amount":1000,"date":"2024-01-01","type":"income"}]"#.to_vec(),
            )
            .unwrap();
        store
            .write(
                GOALS_KEY,
                br#"[{"id":1704067200001,"desc":"Bike","target":500,"date":"2024-06-30","saved":0}]"#.to_vec(),
            )
            .unwrap();
    }

    let ledger = open_ledger(&data_dir);
    assert_eq!(ledger.transactions().len(), 1);
    assert_eq!(
        ledger.transactions().list()[0].kind(),
        TransactionKind::Income
    );
    assert_eq!(ledger.goals().list()[0].target(), dec!(500));
}

#[test_log::test]
fn test_missing_explicit_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.yaml");
    assert!(!missing.exists());

    let result = run_command(
        AppCommand::Summary {
            format: OutputFormat::Table,
        },
        missing.to_str(),
    );
    assert!(result.is_err());
    assert!(fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}
