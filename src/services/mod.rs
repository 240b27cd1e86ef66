//! Service layer for the expense tracker
//!
//! The service layer sits between user-facing commands and the store: it
//! parses and validates input the way the add and edit forms do, and applies
//! the list filters.

pub mod expense;
pub mod filter;

pub use expense::{ExpenseChanges, ExpenseService};
pub use filter::ExpenseFilter;
