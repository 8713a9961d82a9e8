//! Interactive menu
//!
//! The prompt-driven loop: add a transaction, view a monthly summary, or
//! exit. Bad input is reported and re-prompted; nothing here ends the
//! process. End of input leaves the loop cleanly.

use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_date_or, today, Money, Transaction, TransactionKind};
use crate::reports::compute_monthly_summary;
use crate::storage::TransactionStore;

/// Parse a 1-based menu choice in `1..=max`
pub fn parse_selection(input: &str, max: usize) -> LedgerResult<usize> {
    let choice = input.trim();
    match choice.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(LedgerError::InvalidSelection {
            choice: choice.to_string(),
            max,
        }),
    }
}

/// The interactive session
pub struct Menu<'a, R, W> {
    input: R,
    out: W,
    store: &'a mut TransactionStore,
    settings: &'a Settings,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(input: R, out: W, store: &'a mut TransactionStore, settings: &'a Settings) -> Self {
        Self {
            input,
            out,
            store,
            settings,
            today: today(),
        }
    }

    /// Fix the date used when an entered date is invalid
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> LedgerResult<()> {
        loop {
            writeln!(self.out, "\nExpense Tracker Menu:")?;
            writeln!(self.out, "1. Add Transaction")?;
            writeln!(self.out, "2. View Monthly Summary")?;
            writeln!(self.out, "3. Exit")?;

            let Some(line) = self.prompt("Choose an option: ")? else {
                break;
            };

            let finished = match parse_selection(&line, 3) {
                Ok(1) => self.add_transaction()?.is_none(),
                Ok(2) => self.show_summary()?.is_none(),
                Ok(_) => {
                    writeln!(self.out, "Exiting...")?;
                    true
                }
                Err(_) => {
                    writeln!(self.out, "Invalid option, try again.")?;
                    false
                }
            };

            if finished {
                break;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    /// Print `question` and read one line; `None` at end of input
    fn prompt(&mut self, question: &str) -> LedgerResult<Option<String>> {
        write!(self.out, "{}", question)?;
        self.out.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string()))
    }

    /// Ask until `parse` accepts the answer
    fn prompt_until<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> LedgerResult<T>,
    ) -> LedgerResult<Option<T>> {
        loop {
            let Some(line) = self.prompt(question)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.out, "{}", err)?,
            }
        }
    }

    fn add_transaction(&mut self) -> LedgerResult<Option<()>> {
        let settings = self.settings;

        writeln!(self.out, "\nSelect transaction type:")?;
        for (i, kind) in TransactionKind::ALL.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, kind)?;
        }
        let Some(kind) = self.prompt_until("Type: ", |s| {
            parse_selection(s, TransactionKind::ALL.len()).map(|n| TransactionKind::ALL[n - 1])
        })?
        else {
            return Ok(None);
        };

        let categories = settings.categories.categories_for(kind);
        writeln!(self.out, "Select category:")?;
        for (i, name) in categories.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, name)?;
        }
        let Some(category) = self.prompt_until("Category: ", |s| {
            parse_selection(s, categories.len()).map(|n| categories[n - 1].clone())
        })?
        else {
            return Ok(None);
        };

        let Some(amount) = self.prompt_until("Enter amount: ", Money::parse_amount)? else {
            return Ok(None);
        };

        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(None);
        };

        let Some(date_input) = self.prompt("Enter date (yyyy-MM-dd): ")? else {
            return Ok(None);
        };
        let date = parse_date_or(&date_input, self.today);
        if date.fell_back() {
            writeln!(self.out, "Invalid date format, using current date.")?;
        }

        let txn = Transaction::new(date.date(), kind, category, amount, description);
        match self.store.add(txn) {
            Ok(()) => writeln!(self.out, "Transaction added successfully!")?,
            Err(err) => writeln!(self.out, "Transaction was not saved: {}", err)?,
        }

        Ok(Some(()))
    }

    fn show_summary(&mut self) -> LedgerResult<Option<()>> {
        let Some(year) = self.prompt_until("\nEnter year (YYYY): ", |s| {
            s.trim()
                .parse::<i32>()
                .map_err(|_| LedgerError::Validation(format!("'{}' is not a year", s.trim())))
        })?
        else {
            return Ok(None);
        };

        let Some(month) = self.prompt_until("Enter month (1-12): ", |s| parse_selection(s, 12))?
        else {
            return Ok(None);
        };

        let report = compute_monthly_summary(self.store.all(), year, month as u32);
        write!(
            self.out,
            "\n{}",
            report.format_terminal(&self.settings.currency_symbol)
        )?;

        Ok(Some(()))
    }
}
