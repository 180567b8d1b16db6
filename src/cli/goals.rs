use super::{OutputFormat, date_or_today, to_json, ui};
use crate::core::input::parse_amount;
use crate::core::{Goal, GoalStore, Ledger};
use crate::store::SnapshotStore;
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, CellAlignment, Color};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::info;

/// Goal as emitted in JSON output, with its derived progress.
#[derive(Serialize)]
struct GoalView<'a> {
    id: i64,
    #[serde(rename = "desc")]
    description: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    target: Decimal,
    #[serde(rename = "date")]
    due_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    saved: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    progress_percent: Decimal,
    reached: bool,
}

impl<'a> From<&'a Goal> for GoalView<'a> {
    fn from(goal: &'a Goal) -> Self {
        Self {
            id: goal.id(),
            description: goal.description(),
            target: goal.target(),
            due_date: goal.due_date(),
            saved: goal.saved(),
            progress_percent: goal.progress_percent(),
            reached: goal.is_reached(),
        }
    }
}

pub fn add<S: SnapshotStore>(
    ledger: &mut Ledger<S>,
    description: &str,
    target: &str,
    due: Option<&str>,
    currency: &str,
) -> Result<String> {
    let target = parse_amount(target)?;
    let due = date_or_today(due)?;
    let goal = ledger.add_goal(description, target, due)?;
    info!(id = goal.id(), "Created goal");

    Ok(format!(
        "Added goal #{}: {} {} due {}",
        goal.id(),
        goal.description(),
        ui::format_money(goal.target(), currency),
        goal.due_date()
    ))
}

pub fn contribute<S: SnapshotStore>(
    ledger: &mut Ledger<S>,
    id: i64,
    amount: &str,
    currency: &str,
) -> Result<String> {
    let amount = parse_amount(amount)?;
    let goal = ledger.contribute(id, amount)?;

    let mut message = format!(
        "{}: saved {} of {} ({}%)",
        goal.description(),
        ui::format_money(goal.saved(), currency),
        ui::format_money(goal.target(), currency),
        format_percent(goal.progress_percent())
    );
    if goal.is_reached() {
        message.push_str(&format!(
            " {}",
            ui::style_text("✓ Reached", ui::StyleType::TotalValue)
        ));
    }
    Ok(message)
}

pub fn render(store: &GoalStore, format: OutputFormat, currency: &str) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let views: Vec<GoalView> = store.list().iter().map(GoalView::from).collect();
            to_json(&views)
        }
        OutputFormat::Table => Ok(display_as_table(store.list(), currency)),
    }
}

fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}")
}

fn display_as_table(goals: &[Goal], currency: &str) -> String {
    if goals.is_empty() {
        return ui::style_text("No goals yet", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Goal"),
        ui::header_cell("Due"),
        ui::header_cell("Target"),
        ui::header_cell("Saved"),
        ui::header_cell("Progress"),
    ]);

    for goal in goals {
        let progress = format!(
            "{} {}%",
            ui::progress_bar(goal.progress_percent()),
            format_percent(goal.progress_percent())
        );
        let progress_cell = if goal.is_reached() {
            Cell::new(format!("{progress} ✓ Reached")).fg(Color::Green)
        } else {
            Cell::new(progress)
        };

        table.add_row(vec![
            Cell::new(goal.id()).set_alignment(CellAlignment::Right),
            Cell::new(goal.description()),
            Cell::new(goal.due_date()),
            ui::money_cell(goal.target(), currency),
            ui::money_cell(goal.saved(), currency),
            progress_cell,
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Savings Goals", ui::StyleType::Title),
        table
    )
}
