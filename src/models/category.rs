//! Category sets
//!
//! Each transaction kind has a fixed, ordered list of categories. Order only
//! matters for menu display. The lists are plain configuration data so they
//! can be extended from the settings file without touching aggregation code.

use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// Default income categories, in menu order
pub const DEFAULT_INCOME_CATEGORIES: &[&str] = &["Salary", "Business", "Investment", "Other"];

/// Default expense categories, in menu order
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &["Food", "Rent", "Travel", "Utilities", "Other"];

/// The category lists for both transaction kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    #[serde(default = "default_income")]
    income: Vec<String>,

    #[serde(default = "default_expense")]
    expense: Vec<String>,
}

fn default_income() -> Vec<String> {
    DEFAULT_INCOME_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

fn default_expense() -> Vec<String> {
    DEFAULT_EXPENSE_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            income: default_income(),
            expense: default_expense(),
        }
    }
}

impl CategoryConfig {
    /// Build a category config from explicit lists
    pub fn new(income: Vec<String>, expense: Vec<String>) -> Self {
        Self { income, expense }
    }

    /// Get the ordered categories for a kind
    pub fn categories_for(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }

    /// Check whether a category belongs to a kind
    pub fn contains(&self, kind: TransactionKind, name: &str) -> bool {
        self.categories_for(kind).iter().any(|c| c == name)
    }

    /// Look up a category by its 1-based menu position
    pub fn by_position(&self, kind: TransactionKind, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|idx| self.categories_for(kind).get(idx))
            .map(String::as_str)
    }
}
