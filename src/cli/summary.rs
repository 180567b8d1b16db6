use super::{OutputFormat, to_json, ui};
use crate::core::analytics::{self, Totals};
use crate::core::Transaction;
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
struct SummaryView {
    #[serde(flatten)]
    totals: Totals,
    #[serde(with = "rust_decimal::serde::float_option")]
    income_ratio: Option<Decimal>,
}

impl Totals {
    pub fn display_as_text(&self, currency: &str) -> String {
        let balance_style = if self.balance.is_sign_negative() && !self.balance.is_zero() {
            ui::StyleType::Error
        } else {
            ui::StyleType::TotalValue
        };
        let ratio = self
            .income_ratio()
            .map_or("—".to_string(), |r| format!("{r}%"));

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Income"),
            ui::header_cell("Expenses"),
            ui::header_cell("Income share"),
        ]);
        table.add_row(vec![
            ui::money_cell(self.income, currency),
            ui::money_cell(-self.expense, currency),
            comfy_table::Cell::new(ratio),
        ]);

        format!(
            "{}: {}\n\n{}",
            ui::style_text("Balance", ui::StyleType::TotalLabel),
            ui::style_text(&ui::format_money(self.balance, currency), balance_style),
            table
        )
    }
}

pub fn render(transactions: &[Transaction], format: OutputFormat, currency: &str) -> Result<String> {
    let totals = analytics::totals(transactions);
    match format {
        OutputFormat::Json => to_json(&SummaryView {
            totals,
            income_ratio: totals.income_ratio(),
        }),
        OutputFormat::Table => Ok(totals.display_as_text(currency)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<Transaction> {
        let day = |d: u32| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        vec![
            Transaction::new(1, "Salary", dec!(1000), day(1), TransactionKind::Income).unwrap(),
            Transaction::new(2, "Rent", dec!(300), day(2), TransactionKind::Expense).unwrap(),
        ]
    }

    #[test]
    fn test_render_json() {
        let json = render(&sample(), OutputFormat::Json, "Rs").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["income"], serde_json::json!(1000.0));
        assert_eq!(value["expense"], serde_json::json!(300.0));
        assert_eq!(value["balance"], serde_json::json!(700.0));
        assert_eq!(value["income_ratio"], serde_json::json!(77.0));
    }

    #[test]
    fn test_render_json_without_transactions() {
        let json = render(&[], OutputFormat::Json, "Rs").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["balance"], serde_json::json!(0.0));
        assert!(value["income_ratio"].is_null());
    }

    #[test]
    fn test_render_table_shows_balance() {
        let output = render(&sample(), OutputFormat::Table, "Rs").unwrap();
        assert!(output.contains("Rs700.00"));
        assert!(output.contains("77%"));
    }
}
