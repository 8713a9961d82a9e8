//! Configuration module for the ledger
//!
//! This module provides configuration management including:
//! - Data and settings file resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
