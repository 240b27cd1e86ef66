//! List filters
//!
//! A date window (inclusive, by local calendar day) and an optional category.
//! The store has no query parameters; views load everything and narrow it
//! down here.

use chrono::{Duration, NaiveDate};
use std::fmt;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense};

/// Criteria for narrowing a list of expenses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// First day included
    pub from: Option<NaiveDate>,
    /// Last day included
    pub to: Option<NaiveDate>,
    /// Only this category; `None` means all categories
    pub category: Option<Category>,
}

impl ExpenseFilter {
    /// Matches everything
    pub fn all() -> Self {
        Self::default()
    }

    /// The `days` days before `today` through the end of `today`
    pub fn last_days(days: u32, today: NaiveDate) -> Self {
        Self {
            from: Some(today - Duration::days(i64::from(days))),
            to: Some(today),
            category: None,
        }
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.category.is_none()
    }

    /// Reject windows that end before they start
    pub fn validate(&self) -> ExpenseResult<()> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(ExpenseError::Validation(format!(
                    "Start date {} is after end date {}",
                    from, to
                )));
            }
        }
        Ok(())
    }

    /// A record whose date can't be read only passes a filter with no date bounds
    pub fn matches(&self, expense: &Expense) -> bool {
        match expense.date.local_day() {
            Some(day) => {
                if self.from.is_some_and(|from| day < from) {
                    return false;
                }
                if self.to.is_some_and(|to| day > to) {
                    return false;
                }
            }
            None if self.from.is_some() || self.to.is_some() => return false,
            None => {}
        }
        match &self.category {
            Some(category) => &expense.category == category,
            None => true,
        }
    }

    /// Matching expenses, stored order preserved
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}

/// Short summary such as `Food • 2024-02-10 - 2024-03-11`
impl fmt::Display for ExpenseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(category) = &self.category {
            write!(f, "{} • ", category)?;
        }
        match (self.from, self.to) {
            (None, None) => write!(f, "All dates"),
            (Some(from), None) => write!(f, "From {}", from),
            (None, Some(to)) => write!(f, "Until {}", to),
            (Some(from), Some(to)) => write!(f, "{} - {}", from, to),
        }
    }
}
