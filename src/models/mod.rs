//! Core data models for the ledger
//!
//! This module contains the data structures that represent the ledger
//! domain: transactions, money amounts, category sets and date input.

pub mod category;
pub mod date;
pub mod money;
pub mod transaction;

pub use category::CategoryConfig;
pub use date::{parse_date, parse_date_or, today, DateInput, DATE_FORMAT};
pub use money::Money;
pub use transaction::{Transaction, TransactionKind, UnknownKind};
