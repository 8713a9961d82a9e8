//! Path management for the ledger
//!
//! ## Path Resolution Order
//!
//! Data file:
//! 1. `--file` on the command line
//! 2. `data_file` in the settings file
//! 3. `transactions.txt` in the working directory
//!
//! Settings file: `--config` on the command line, otherwise `ledger.json` in
//! the working directory.

use std::path::{Path, PathBuf};

use super::settings::Settings;
use crate::error::LedgerError;

/// Default transaction file name, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "transactions.txt";

/// Default settings file name, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "ledger.json";

/// The files used by the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerPaths {
    settings_file: PathBuf,
    data_file: PathBuf,
}

impl Default for LedgerPaths {
    fn default() -> Self {
        Self {
            settings_file: PathBuf::from(DEFAULT_SETTINGS_FILE),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl LedgerPaths {
    /// Create LedgerPaths from explicit files
    pub fn new(settings_file: impl Into<PathBuf>, data_file: impl Into<PathBuf>) -> Self {
        Self {
            settings_file: settings_file.into(),
            data_file: data_file.into(),
        }
    }

    /// Replace the data file (useful for testing)
    pub fn with_data_file(mut self, data_file: impl Into<PathBuf>) -> Self {
        self.data_file = data_file.into();
        self
    }

    /// Resolve paths and load settings from command-line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or
    /// parsed.
    pub fn resolve(
        config: Option<PathBuf>,
        file: Option<PathBuf>,
    ) -> Result<(Self, Settings), LedgerError> {
        let settings_file = config.unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
        let settings = Settings::load_or_default(&settings_file)?;

        let data_file = file
            .or_else(|| settings.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        Ok((Self::new(settings_file, data_file), settings))
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> &Path {
        &self.settings_file
    }

    /// Get the path to the transaction file
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}
