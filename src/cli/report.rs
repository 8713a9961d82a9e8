//! CLI commands for reports
//!
//! Provides the monthly summary command and its CSV export.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::Datelike;
use clap::Args;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::today;
use crate::reports::compute_monthly_summary;
use crate::storage::TransactionStore;

/// Arguments for `summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Year (YYYY), defaults to the current year
    #[arg(short, long)]
    pub year: Option<i32>,
    /// Month (1-12), defaults to the current month
    #[arg(short, long)]
    pub month: Option<u32>,
    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Reject months outside 1-12 before they reach the summary engine
pub fn validate_month(month: u32) -> LedgerResult<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(LedgerError::Validation(format!(
            "month must be between 1 and 12, got {}",
            month
        )))
    }
}

/// Handle the `summary` command
pub fn handle_summary_command(
    store: &TransactionStore,
    settings: &Settings,
    args: SummaryArgs,
) -> LedgerResult<()> {
    let now = today();
    let year = args.year.unwrap_or_else(|| now.year());
    let month = validate_month(args.month.unwrap_or_else(|| now.month()))?;

    let report = compute_monthly_summary(store.all(), year, month);
    print!("{}", report.format_terminal(&settings.currency_symbol));

    if let Some(path) = args.output {
        let file = File::create(&path).map_err(|e| {
            LedgerError::Io(format!("Failed to create {}: {}", path.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!("\nReport exported to: {}", path.display());
    }

    Ok(())
}
