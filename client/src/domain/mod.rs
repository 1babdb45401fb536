//! # Domain Module
//!
//! Pure aggregation over the cached collections. Nothing here performs I/O or
//! holds state; every function takes the data it needs (including the period
//! a view is scoped to) as parameters and never fails.
//!
//! - `analytics`: income/expense totals, recent transactions, category breakdown
//! - `budgets`: per-budget progress and status, overview totals and counts

pub mod analytics;
pub mod budgets;

pub use analytics::*;
pub use budgets::*;
