//! Transaction CLI commands
//!
//! Implements the non-interactive `add` command.

use chrono::NaiveDate;
use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    parse_date_or, today, CategoryConfig, DateInput, Money, Transaction, TransactionKind,
};
use crate::storage::TransactionStore;

use super::menu::parse_selection;

/// Transaction type as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Transaction type
    #[arg(short, long, value_enum)]
    pub kind: KindArg,
    /// Category name, or its number in the category list
    #[arg(short, long)]
    pub category: String,
    /// Amount (e.g., "42.50")
    #[arg(short, long)]
    pub amount: String,
    /// Description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Find the category a user meant for `kind`
///
/// Accepts a 1-based position in the list or a name (case-insensitive) and
/// returns the configured spelling.
pub fn resolve_category(
    categories: &CategoryConfig,
    kind: TransactionKind,
    input: &str,
) -> LedgerResult<String> {
    let input = input.trim();
    let names = categories.categories_for(kind);

    if input.chars().all(|c| c.is_ascii_digit()) && !input.is_empty() {
        let position = parse_selection(input, names.len())?;
        return Ok(names[position - 1].clone());
    }

    names
        .iter()
        .find(|name| name.eq_ignore_ascii_case(input))
        .cloned()
        .ok_or_else(|| {
            LedgerError::Validation(format!(
                "'{}' is not a valid {} category (choose from: {})",
                input,
                kind,
                names.join(", ")
            ))
        })
}

/// Build a transaction from `add` arguments
///
/// A missing or unparseable date becomes `today`; the returned [`DateInput`]
/// tells the caller whether that happened.
pub fn build_transaction(
    settings: &Settings,
    args: &AddArgs,
    today: NaiveDate,
) -> LedgerResult<(Transaction, DateInput)> {
    let kind = TransactionKind::from(args.kind);
    let category = resolve_category(&settings.categories, kind, &args.category)?;
    let amount = Money::parse_amount(&args.amount)?;

    let date = match &args.date {
        Some(input) => parse_date_or(input, today),
        None => DateInput::Parsed(today),
    };

    let txn = Transaction::new(date.date(), kind, category, amount, args.description.as_str());
    Ok((txn, date))
}

/// Handle the `add` command
pub fn handle_add_command(
    store: &mut TransactionStore,
    settings: &Settings,
    args: AddArgs,
) -> LedgerResult<()> {
    let (txn, date) = build_transaction(settings, &args, today())?;

    if let DateInput::FellBack { input, today } = &date {
        println!("Invalid date format '{}', using current date ({}).", input, today);
    }

    store.add(txn.clone())?;

    println!("Transaction added successfully!");
    println!(
        "  {} {} {} {}",
        txn.date(),
        txn.kind(),
        txn.category(),
        txn.amount().format_with_symbol(&settings.currency_symbol)
    );

    Ok(())
}
