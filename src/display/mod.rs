//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and reports for the terminal.

pub mod expense;
pub mod report;

pub use expense::{format_expense_details, format_expense_list};
pub use report::format_breakdown;
