//! Storage layer for the ledger
//!
//! Provides the flat-file transaction store with atomic rewrites and
//! automatic directory creation.

pub mod codec;
pub mod file_io;
pub mod transactions;

pub use file_io::write_atomic;
pub use transactions::{load_transactions, persist_transactions, LoadPolicy, TransactionStore};
