//! Expense CLI commands
//!
//! Add, list, show, edit and delete expenses.

use chrono::Local;
use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ExpenseId;
use crate::models::sum_amounts;
use crate::services::expense::{
    parse_amount, parse_category, parse_date, parse_day, parse_filter_category,
};
use crate::services::{ExpenseChanges, ExpenseFilter, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        title: String,
        /// Amount (e.g. "4.50")
        amount: String,
        /// Category: Food, Travel, Shopping, Utility or Other
        #[arg(short, long, default_value = "Food")]
        category: String,
        /// Date (YYYY-MM-DD or RFC 3339); defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses (last 30 days by default)
    #[command(alias = "ls")]
    List(FilterArgs),

    /// Show expense details
    Show {
        /// Expense ID
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD or RFC 3339)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
    },
}

/// Date range and category filters shared by `list` and `chart`
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Only this category (any stored label)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Ignore the default date window
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub all: bool,
}

impl FilterArgs {
    /// Build a filter; with no dates and no `--all`, `default_days` ending today
    pub fn to_filter(&self, default_days: Option<u32>) -> ExpenseResult<ExpenseFilter> {
        let category = self.category.as_deref().map(parse_filter_category);
        let from = self.from.as_deref().map(parse_day).transpose()?;
        let to = self.to.as_deref().map(parse_day).transpose()?;

        let filter = match (from, to, default_days) {
            (None, None, Some(days)) if !self.all => {
                ExpenseFilter::last_days(days, Local::now().date_naive())
            }
            _ => ExpenseFilter { from, to, category: None },
        }
        .with_category(category);

        filter.validate()?;
        Ok(filter)
    }
}

fn parse_id(input: &str) -> ExpenseResult<ExpenseId> {
    input
        .parse()
        .map_err(|_| ExpenseError::Validation(format!("Invalid expense ID: '{}'", input)))
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(&storage.expenses);

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            category,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let category = parse_category(&category)?;
            let date = date.as_deref().map(parse_date).transpose()?;

            let expense = service.add(&title, amount, category, date)?;
            println!("Added expense: {}", expense.title);
            println!(
                "  Amount: {}",
                expense.amount.format_with_symbol(&settings.currency_symbol)
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List(args) => {
            let filter = args.to_filter(Some(settings.default_range_days))?;
            let expenses = filter.apply(&service.list()?);
            let total = sum_amounts(&expenses)?;

            println!("{}", filter);
            print!("{}", format_expense_list(&expenses, total, settings));
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(parse_id(&id)?)?;
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            title,
            amount,
            category,
            date,
        } => {
            let changes = ExpenseChanges {
                title,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category: category.as_deref().map(parse_category).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --title, --amount, --category or --date.");
                return Ok(());
            }

            let updated = service.edit(parse_id(&id)?, changes)?;
            println!("Updated expense: {}", updated.title);
        }

        ExpenseCommands::Delete { id } => {
            let deleted = service.delete(parse_id(&id)?)?;
            println!("Deleted expense: {}", deleted.title);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::NaiveDate;

    #[test]
    fn test_default_window() {
        let filter = FilterArgs::default().to_filter(Some(30)).unwrap();
        let today = Local::now().date_naive();
        assert_eq!(filter.to, Some(today));
        assert_eq!(filter.from, Some(today - chrono::Duration::days(30)));
    }

    #[test]
    fn test_all_removes_window_but_keeps_category() {
        let args = FilterArgs {
            category: Some("travel".into()),
            all: true,
            ..FilterArgs::default()
        };
        let filter = args.to_filter(Some(30)).unwrap();
        assert_eq!(filter.from, None);
        assert_eq!(filter.to, None);
        assert_eq!(filter.category, Some(Category::Travel));
    }

    #[test]
    fn test_explicit_range() {
        let args = FilterArgs {
            from: Some("2024-03-01".into()),
            to: Some("2024-03-31".into()),
            ..FilterArgs::default()
        };
        let filter = args.to_filter(Some(30)).unwrap();
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(filter.to, NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test]
    fn test_no_default_window() {
        let filter = FilterArgs::default().to_filter(None).unwrap();
        assert!(filter.is_unbounded());
    }

    #[test]
    fn test_invalid_filters_rejected() {
        let inverted = FilterArgs {
            from: Some("2024-03-31".into()),
            to: Some("2024-03-01".into()),
            ..FilterArgs::default()
        };
        assert!(inverted.to_filter(None).unwrap_err().is_validation());

        let bad_day = FilterArgs {
            from: Some("March 1".into()),
            ..FilterArgs::default()
        };
        assert!(bad_day.to_filter(None).unwrap_err().is_validation());
    }

    #[test]
    fn test_filter_on_stored_custom_category() {
        let args = FilterArgs {
            category: Some("Gifts".into()),
            ..FilterArgs::default()
        };
        let filter = args.to_filter(None).unwrap();
        assert_eq!(filter.category, Some(Category::Custom("Gifts".into())));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), ExpenseId::from_raw(42));
        assert!(parse_id("abc").unwrap_err().is_validation());
    }
}
