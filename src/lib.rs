//! pocket-ledger - Terminal-based personal income and expense ledger
//!
//! This library provides the core functionality for the ledger: it records
//! income and expense entries with a category, amount, description and date,
//! keeps them in a flat file, and totals them by category for a month.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings and file path resolution
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, categories, dates)
//! - `storage`: Flat-file transaction store with atomic rewrites
//! - `reports`: Monthly summary computation and formatting
//! - `cli`: Input layer (command handlers and the interactive menu)
//!
//! # Example
//!
//! ```rust,no_run
//! use pocket_ledger::reports::compute_monthly_summary;
//! use pocket_ledger::storage::TransactionStore;
//!
//! let store = TransactionStore::load("transactions.txt")?;
//! let report = compute_monthly_summary(store.all(), 2024, 3);
//! print!("{}", report.format_terminal("$"));
//! # Ok::<(), pocket_ledger::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
