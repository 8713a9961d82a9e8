//! Reports module for the ledger
//!
//! Provides the monthly income and expense summary.

pub mod monthly;

pub use monthly::{compute_monthly_summary, CategoryTotal, MonthlyReport};
