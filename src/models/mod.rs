//! Core data models for the expense tracker

pub mod category;
pub mod date;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{group_by_category, Category, CategoryParseError, CategoryTotal};
pub use date::ExpenseDate;
pub use expense::{sum_amounts, Expense, ExpenseValidationError, NewExpense};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
