//! Report CLI commands
//!
//! The category chart.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::report::format_breakdown;
use crate::error::ExpenseResult;
use crate::reports::CategoryBreakdown;
use crate::storage::Storage;

use super::expense::FilterArgs;

/// Arguments for the chart command
#[derive(Args, Debug, Default)]
pub struct ChartArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Handle the chart command
///
/// Without filters the chart covers every stored expense.
pub fn handle_chart_command(
    storage: &Storage,
    settings: &Settings,
    args: ChartArgs,
) -> ExpenseResult<()> {
    let filter = args.filter.to_filter(None)?;

    let (report, title) = if filter.is_unbounded() {
        (
            CategoryBreakdown::generate(&storage.expenses)?,
            "Expense Analytics".to_string(),
        )
    } else {
        let expenses = filter.apply(&storage.expenses.list_all()?);
        (
            CategoryBreakdown::from_expenses(&expenses)?,
            format!("Expenses by Category ({})", filter),
        )
    };

    print!("{}", format_breakdown(&report, &title, settings));
    Ok(())
}
