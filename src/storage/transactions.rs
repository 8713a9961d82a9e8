//! Transaction store backed by a flat file
//!
//! Holds transactions in insertion order and keeps the file in step with
//! memory. Every `add` rewrites the whole file, which costs O(n) per add; that
//! is acceptable for the hundreds to low thousands of entries a personal
//! ledger accumulates.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

use super::codec;
use super::file_io::{read_if_exists, write_atomic};

/// What to do when a line of the transaction file cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// Abort the load with the first `CorruptData` error
    #[default]
    FailFast,
    /// Skip bad lines, log a warning for each and report them to the caller
    SkipAndWarn,
}

/// Read every transaction in `path`, failing on the first corrupt line
///
/// A missing file is an empty ledger, not an error.
pub fn load_transactions<P: AsRef<Path>>(path: P) -> LedgerResult<Vec<Transaction>> {
    let (transactions, _) = read_store_file(path.as_ref(), LoadPolicy::FailFast)?;
    Ok(transactions)
}

/// Rewrite `path` so it holds exactly `transactions`
pub fn persist_transactions<P: AsRef<Path>>(
    path: P,
    transactions: &[Transaction],
) -> LedgerResult<()> {
    write_atomic(path, &codec::encode(transactions)?)
}

fn read_store_file(
    path: &Path,
    policy: LoadPolicy,
) -> LedgerResult<(Vec<Transaction>, Vec<LedgerError>)> {
    let Some(bytes) = read_if_exists(path)? else {
        tracing::debug!(path = %path.display(), "no transaction file, starting empty");
        return Ok((Vec::new(), Vec::new()));
    };

    let mut transactions = Vec::new();
    let mut skipped = Vec::new();

    for result in codec::decode(bytes.as_slice()) {
        match result {
            Ok(txn) => transactions.push(txn),
            Err(err) if err.is_corrupt_data() && policy == LoadPolicy::SkipAndWarn => {
                tracing::warn!(path = %path.display(), %err, "skipping corrupt record");
                skipped.push(err);
            }
            Err(err) => return Err(err),
        }
    }

    tracing::debug!(
        path = %path.display(),
        loaded = transactions.len(),
        skipped = skipped.len(),
        "loaded transactions"
    );

    Ok((transactions, skipped))
}

/// In-memory ledger that mirrors its backing file
#[derive(Debug)]
pub struct TransactionStore {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Load the store from `path`, failing on the first corrupt line
    pub fn load(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let (store, _) = Self::load_with_policy(path, LoadPolicy::FailFast)?;
        Ok(store)
    }

    /// Load the store from `path` under an explicit corruption policy
    ///
    /// Returns the store and the corrupt-line errors that were skipped, which
    /// is always empty under [`LoadPolicy::FailFast`].
    pub fn load_with_policy(
        path: impl Into<PathBuf>,
        policy: LoadPolicy,
    ) -> LedgerResult<(Self, Vec<LedgerError>)> {
        let path = path.into();
        let (transactions, skipped) = read_store_file(&path, policy)?;
        Ok((Self { path, transactions }, skipped))
    }

    /// Append a transaction and make it durable
    ///
    /// The file is rewritten with the new record first; memory only changes
    /// once the write succeeded, so an encoding or `Persistence` error leaves
    /// the store exactly as it was.
    pub fn add(&mut self, txn: Transaction) -> LedgerResult<()> {
        let bytes = codec::encode(self.transactions.iter().chain(std::iter::once(&txn)))?;
        write_atomic(&self.path, &bytes)?;

        tracing::debug!(path = %self.path.display(), %txn, "transaction added");
        self.transactions.push(txn);
        Ok(())
    }

    /// Rewrite the backing file from memory
    pub fn persist(&self) -> LedgerResult<()> {
        persist_transactions(&self.path, &self.transactions)
    }

    /// All transactions in insertion order
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
