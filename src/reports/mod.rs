//! Reports module
//!
//! Derived views over the expense collection.

pub mod breakdown;

pub use breakdown::{CategoryBreakdown, CategorySlice};
