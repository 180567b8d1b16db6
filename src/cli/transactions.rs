use super::{OutputFormat, date_or_today, to_json, ui};
use crate::core::input::parse_amount;
use crate::core::{Ledger, Transaction, TransactionKind, TransactionStore};
use crate::store::SnapshotStore;
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, CellAlignment};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

/// Transaction as emitted in JSON output, with the amount as a raw number.
#[derive(Serialize)]
struct TransactionView<'a> {
    id: i64,
    #[serde(rename = "desc")]
    description: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransactionKind,
}

impl<'a> From<&'a Transaction> for TransactionView<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            id: tx.id(),
            description: tx.description(),
            amount: tx.amount(),
            date: tx.date(),
            kind: tx.kind(),
        }
    }
}

pub fn add<S: SnapshotStore>(
    ledger: &mut Ledger<S>,
    kind: TransactionKind,
    description: &str,
    amount: &str,
    date: Option<&str>,
    currency: &str,
) -> Result<String> {
    let amount = parse_amount(amount)?;
    let date = date_or_today(date)?;
    let tx = ledger.add_transaction(description, amount, date, kind)?;
    info!(id = tx.id(), "Recorded transaction");

    Ok(format!(
        "Added {} #{}: {} {} on {}",
        tx.kind(),
        tx.id(),
        tx.description(),
        ui::format_money(tx.amount(), currency),
        tx.date()
    ))
}

pub fn remove<S: SnapshotStore>(ledger: &mut Ledger<S>, id: i64) -> Result<String> {
    let message = if ledger.remove_transaction(id)? {
        format!("Removed transaction #{id}")
    } else {
        ui::style_text(
            &format!("No transaction with id {id}"),
            ui::StyleType::Subtle,
        )
    };
    Ok(message)
}

pub fn render(store: &TransactionStore, format: OutputFormat, currency: &str) -> Result<String> {
    let sorted = store.newest_first();
    match format {
        OutputFormat::Json => {
            let views: Vec<TransactionView> =
                sorted.iter().map(|tx| TransactionView::from(*tx)).collect();
            to_json(&views)
        }
        OutputFormat::Table => Ok(display_as_table(&sorted, currency)),
    }
}

fn display_as_table(transactions: &[&Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return ui::style_text("No transactions yet", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Date"),
        ui::header_cell("Description"),
        ui::header_cell("Type"),
        ui::header_cell("Amount"),
    ]);

    for tx in transactions {
        table.add_row(vec![
            Cell::new(tx.id()).set_alignment(CellAlignment::Right),
            Cell::new(tx.date()),
            Cell::new(tx.description()),
            Cell::new(tx.kind()),
            ui::amount_cell(tx.amount(), tx.kind(), currency),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Transactions", ui::StyleType::Title),
        table
    )
}
