use crate::core::TransactionKind;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const PROGRESS_WIDTH: usize = 20;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats `value` as `<symbol><|value|>` with two decimals and thousands
/// separators. Negative values get a leading minus sign (U+2212).
pub fn format_money(value: Decimal, symbol: &str) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{rounded:.2}");
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "\u{2212}"
    } else {
        ""
    };
    format!("{sign}{symbol}{grouped}.{fraction}")
}

/// Right aligned money cell, green for positive and red for negative values.
pub fn money_cell(value: Decimal, symbol: &str) -> Cell {
    let color = if value.is_sign_negative() && !value.is_zero() {
        Color::Red
    } else {
        Color::Green
    };
    Cell::new(format_money(value, symbol))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Money cell colored by the kind of transaction it belongs to.
pub fn amount_cell(amount: Decimal, kind: TransactionKind, symbol: &str) -> Cell {
    let (prefix, color) = match kind {
        TransactionKind::Income => ("+", Color::Green),
        TransactionKind::Expense => ("\u{2212}", Color::Red),
    };
    Cell::new(format!("{prefix}{}", format_money(amount, symbol)))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Renders a percentage in 0..=100 as a fixed width text bar.
pub fn progress_bar(percent: Decimal) -> String {
    let clamped = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (clamped * Decimal::from(PROGRESS_WIDTH) / Decimal::ONE_HUNDRED)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(PROGRESS_WIDTH);
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled)
    )
}
