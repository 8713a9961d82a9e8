//! Monthly Summary Report
//!
//! Totals income and expenses by category for one calendar month.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionKind};

/// Summed amount for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category name
    pub category: String,
    /// Sum of all amounts in the category
    pub total: Money,
    /// Number of transactions
    pub transaction_count: usize,
}

/// Monthly Summary Report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Income per category, in order of first occurrence
    pub income_by_category: Vec<CategoryTotal>,
    /// Expenses per category, in order of first occurrence
    pub expense_by_category: Vec<CategoryTotal>,
    /// Sum of all income in the month
    pub total_income: Money,
    /// Sum of all expenses in the month
    pub total_expense: Money,
    /// Number of transactions in the month
    pub transaction_count: usize,
}

/// Running per-category totals that remember first-occurrence order
#[derive(Default)]
struct CategoryTotals {
    index: HashMap<String, usize>,
    rows: Vec<CategoryTotal>,
}

impl CategoryTotals {
    fn add(&mut self, category: &str, amount: Money) {
        let idx = match self.index.get(category) {
            Some(&idx) => idx,
            None => {
                self.rows.push(CategoryTotal {
                    category: category.to_string(),
                    total: Money::zero(),
                    transaction_count: 0,
                });
                self.index.insert(category.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };

        let row = &mut self.rows[idx];
        row.total += amount;
        row.transaction_count += 1;
    }
}

/// Build the summary for `year` and `month` (1-12)
///
/// Only transactions dated in that calendar month count; the day is
/// irrelevant. Out-of-range months are not rejected here, they simply match
/// nothing.
pub fn compute_monthly_summary(transactions: &[Transaction], year: i32, month: u32) -> MonthlyReport {
    let mut income = CategoryTotals::default();
    let mut expense = CategoryTotals::default();
    let mut total_income = Money::zero();
    let mut total_expense = Money::zero();
    let mut transaction_count = 0;

    for txn in transactions.iter().filter(|t| t.is_in_month(year, month)) {
        match txn.kind() {
            TransactionKind::Income => {
                income.add(txn.category(), txn.amount());
                total_income += txn.amount();
            }
            TransactionKind::Expense => {
                expense.add(txn.category(), txn.amount());
                total_expense += txn.amount();
            }
        }
        transaction_count += 1;
    }

    MonthlyReport {
        year,
        month,
        income_by_category: income.rows,
        expense_by_category: expense.rows,
        total_income,
        total_expense,
        transaction_count,
    }
}

impl MonthlyReport {
    /// Income minus expenses; negative when more went out than came in
    pub fn net_balance(&self) -> Money {
        self.total_income - self.total_expense
    }

    /// Total income for a category, if it had any transactions
    pub fn income_for(&self, category: &str) -> Option<Money> {
        find(&self.income_by_category, category)
    }

    /// Total expenses for a category, if it had any transactions
    pub fn expense_for(&self, category: &str) -> Option<Money> {
        find(&self.expense_by_category, category)
    }

    /// True when no transaction fell in the month
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("Monthly Summary for {}/{}\n", self.month, self.year));

        output.push_str("Income:\n");
        for row in &self.income_by_category {
            output.push_str(&format!("  {}: {}\n", row.category, money(row.total)));
        }
        output.push_str(&format!("Total Income: {}\n", money(self.total_income)));

        output.push_str("\nExpenses:\n");
        for row in &self.expense_by_category {
            output.push_str(&format!("  {}: {}\n", row.category, money(row.total)));
        }
        output.push_str(&format!("Total Expenses: {}\n", money(self.total_expense)));
        output.push_str(&format!("Net Balance: {}\n", money(self.net_balance())));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let export_err = |e: csv::Error| LedgerError::Io(format!("Failed to export report: {}", e));
        let mut out = csv::Writer::from_writer(writer);

        out.write_record(["Year", "Month", "Type", "Category", "Amount", "Transaction Count"])
            .map_err(export_err)?;

        let year = self.year.to_string();
        let month = self.month.to_string();

        for (kind, rows) in [
            (TransactionKind::Income, &self.income_by_category),
            (TransactionKind::Expense, &self.expense_by_category),
        ] {
            for row in rows {
                out.write_record([
                    year.as_str(),
                    month.as_str(),
                    kind.as_str(),
                    row.category.as_str(),
                    row.total.to_plain().as_str(),
                    row.transaction_count.to_string().as_str(),
                ])
                .map_err(export_err)?;
            }
        }

        for (label, amount) in [
            ("Total Income", self.total_income),
            ("Total Expenses", self.total_expense),
            ("Net Balance", self.net_balance()),
        ] {
            out.write_record([year.as_str(), month.as_str(), label, "", amount.to_plain().as_str(), ""])
                .map_err(export_err)?;
        }

        out.flush()
            .map_err(|e| LedgerError::Io(format!("Failed to export report: {}", e)))?;
        Ok(())
    }
}

fn find(rows: &[CategoryTotal], category: &str) -> Option<Money> {
    rows.iter().find(|r| r.category == category).map(|r| r.total)
}
