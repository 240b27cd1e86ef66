//! Category breakdown
//!
//! The data behind the chart view: one slice per category with its total,
//! share of the overall spend and color.

use crate::error::ExpenseResult;
use crate::models::{group_by_category, sum_amounts, Category, Expense, Money};
use crate::storage::{ExpenseStore, KeyValueStore};

/// One category's share of the spend
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub category: Category,
    pub total: Money,
    pub count: usize,
    pub color: &'static str,
    /// Percentage of the breakdown total (0-100)
    pub percentage: f64,
}

/// Spending split by category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    /// Slices in first-occurrence order
    pub slices: Vec<CategorySlice>,
    pub total: Money,
    pub expense_count: usize,
}

impl CategoryBreakdown {
    /// Breakdown over every stored expense
    pub fn generate<S: KeyValueStore>(store: &ExpenseStore<S>) -> ExpenseResult<Self> {
        let groups = store.aggregate_by_category()?;
        let total = groups
            .iter()
            .try_fold(Money::zero(), |sum, g| sum.checked_add(g.total))?;
        let expense_count = groups.iter().map(|g| g.count).sum();

        let slices = groups
            .into_iter()
            .map(|g| CategorySlice {
                percentage: percentage_of(g.total, total),
                category: g.category,
                total: g.total,
                count: g.count,
                color: g.color,
            })
            .collect();

        Ok(Self {
            slices,
            total,
            expense_count,
        })
    }

    /// Breakdown over an already filtered list
    pub fn from_expenses(expenses: &[Expense]) -> ExpenseResult<Self> {
        let total = sum_amounts(expenses)?;

        let slices = group_by_category(expenses)?
            .into_iter()
            .map(|g| CategorySlice {
                percentage: percentage_of(g.total, total),
                category: g.category,
                total: g.total,
                count: g.count,
                color: g.color,
            })
            .collect();

        Ok(Self {
            slices,
            total,
            expense_count: expenses.len(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Largest slice total, used to scale bars
    pub fn max_total(&self) -> Money {
        self.slices
            .iter()
            .map(|s| s.total)
            .max()
            .unwrap_or_default()
    }
}

fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.to_f64() / whole.to_f64() * 100.0
    }
}
