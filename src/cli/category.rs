//! Category CLI commands
//!
//! Lists the configured categories for each transaction type.

use crate::config::Settings;
use crate::models::{CategoryConfig, TransactionKind};

/// Format the numbered category lists
pub fn format_category_lists(categories: &CategoryConfig) -> String {
    let mut output = String::new();

    for kind in TransactionKind::ALL {
        output.push_str(&format!("{} categories:\n", kind));
        for (i, name) in categories.categories_for(kind).iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, name));
        }
    }

    output
}

/// Handle the `categories` command
pub fn handle_categories_command(settings: &Settings) {
    print!("{}", format_category_lists(&settings.categories));
}
