//! Expense Tracker - personal expense tracking
//!
//! Users record spending entries (title, amount, category, date), browse and
//! filter them, edit or delete them, and view a breakdown by category.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expense, money, category, date and id types
//! - `storage`: Key-value backends and the expense store
//! - `services`: Input validation and list filtering
//! - `reports`: Category breakdown
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```
//! use expense_tracker::models::{Category, Money, NewExpense};
//! use expense_tracker::storage::{ExpenseStore, MemoryStore};
//!
//! let store = ExpenseStore::new(MemoryStore::new());
//! store.create(NewExpense::new("Coffee", Money::from_cents(450), Category::Food))?;
//!
//! let groups = store.aggregate_by_category()?;
//! assert_eq!(groups[0].total, Money::from_cents(450));
//! # Ok::<(), expense_tracker::ExpenseError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
