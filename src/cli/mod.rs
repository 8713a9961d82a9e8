//! CLI command handlers
//!
//! This module is the input layer: it collects and validates user input,
//! then calls into the store and the summary engine.

pub mod category;
pub mod menu;
pub mod report;
pub mod transaction;

pub use category::handle_categories_command;
pub use menu::{parse_selection, Menu};
pub use report::{handle_summary_command, SummaryArgs};
pub use transaction::{handle_add_command, AddArgs, KindArg};
