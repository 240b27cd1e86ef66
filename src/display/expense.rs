//! Expense display formatting
//!
//! Formats expenses as a table for the list view and as a detail card.

use tabled::{settings::Style, Table, Tabled};

use crate::config::settings::Settings;
use crate::models::{Expense, Money};

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of expenses with a count and total footer
pub fn format_expense_list(expenses: &[Expense], total: Money, settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n\nRun 'expenses add <title> <amount>' to record one.\n"
            .to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.to_string(),
            date: e.date.format_local(&settings.date_format),
            title: truncate(&e.title, 32),
            category: e.category.to_string(),
            amount: e.amount.format_with_symbol(&settings.currency_symbol),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    let count = expenses.len();
    format!(
        "{}\n{} expense{}  Total: {}\n",
        table,
        count,
        if count == 1 { "" } else { "s" },
        total.format_with_symbol(&settings.currency_symbol)
    )
}

/// Format a single expense in detail
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.title));
    output.push_str(&format!("  ID:       {}\n", expense.id));
    output.push_str(&format!(
        "  Amount:   {}\n",
        expense.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!(
        "  Category: {} ({})\n",
        expense.category,
        expense.category.color()
    ));
    output.push_str(&format!(
        "  Date:     {}\n",
        expense.date.format_local("%A, %B %-d, %Y %H:%M")
    ));

    output
}
