//! Expense model
//!
//! A single spending record: what it was, how much, which category and when.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::date::ExpenseDate;
use super::ids::ExpenseId;
use super::money::Money;
use crate::error::ExpenseResult;

/// A stored expense
///
/// Field order matches the persisted JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    pub amount: Money,
    pub category: Category,
    /// When the money was spent (creation time unless edited)
    pub date: ExpenseDate,
}

impl Expense {
    /// Check the rules the add and edit forms enforce
    ///
    /// The store itself never calls this.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(&self.title, self.amount)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.title, self.category, self.amount)
    }
}

/// Fields supplied when creating an expense; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub title: String,
    pub amount: Money,
    pub category: Category,
    pub date: DateTime<Utc>,
}

impl NewExpense {
    /// New expense dated now
    pub fn new(title: impl Into<String>, amount: Money, category: Category) -> Self {
        Self {
            title: title.into(),
            amount,
            category,
            date: Utc::now(),
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(&self.title, self.amount)
    }

    /// Attach an id, producing the stored record
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            title: self.title,
            amount: self.amount,
            category: self.category,
            date: self.date.into(),
        }
    }
}

fn validate_fields(title: &str, amount: Money) -> Result<(), ExpenseValidationError> {
    if title.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyTitle);
    }
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Sum of amounts over any set of expenses
///
/// Fails with `ExpenseError::Overflow` when the total does not fit.
pub fn sum_amounts<'a, I>(expenses: I) -> ExpenseResult<Money>
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses
        .into_iter()
        .try_fold(Money::zero(), |total, e| total.checked_add(e.amount))
}

/// Validation errors for expense input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyTitle,
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Expense title cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be greater than zero, got {}", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
