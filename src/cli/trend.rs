use super::{OutputFormat, to_json, ui};
use crate::core::Transaction;
use crate::core::analytics::{self, BalancePoint, MonthlySummary};
use anyhow::Result;
use comfy_table::Cell;

pub fn render_balance(
    transactions: &[Transaction],
    format: OutputFormat,
    currency: &str,
) -> Result<String> {
    let points = analytics::running_balance(transactions);
    match format {
        OutputFormat::Json => to_json(&points),
        OutputFormat::Table => Ok(balance_table(&points, currency)),
    }
}

pub fn render_monthly(
    transactions: &[Transaction],
    format: OutputFormat,
    currency: &str,
) -> Result<String> {
    let months = analytics::monthly_rollup(transactions);
    match format {
        OutputFormat::Json => to_json(&months),
        OutputFormat::Table => Ok(monthly_table(&months, currency)),
    }
}

fn balance_table(points: &[BalancePoint], currency: &str) -> String {
    if points.is_empty() {
        return ui::style_text("No transactions yet", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Date"), ui::header_cell("Balance")]);
    for point in points {
        table.add_row(vec![
            Cell::new(point.date),
            ui::money_cell(point.balance, currency),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Balance Trend", ui::StyleType::Title),
        table
    )
}

fn monthly_table(months: &[MonthlySummary], currency: &str) -> String {
    if months.is_empty() {
        return ui::style_text("No transactions yet", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Income"),
        ui::header_cell("Expenses"),
        ui::header_cell("Net"),
    ]);
    for month in months {
        table.add_row(vec![
            Cell::new(&month.month),
            ui::money_cell(month.income, currency),
            ui::money_cell(-month.expense, currency),
            ui::money_cell(month.net(), currency),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Monthly Overview", ui::StyleType::Title),
        table
    )
}
