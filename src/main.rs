use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pocket_ledger::cli::{
    handle_add_command, handle_categories_command, handle_summary_command, AddArgs, Menu,
    SummaryArgs,
};
use pocket_ledger::config::LedgerPaths;
use pocket_ledger::storage::TransactionStore;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Terminal-based personal income and expense ledger",
    long_about = "Records income and expense transactions in a plain text file \
                  and prints monthly summaries by category. Run without a \
                  subcommand for the interactive menu."
)]
struct Cli {
    /// Transaction file (default: transactions.txt in the working directory)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Settings file (default: ledger.json in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu
    Menu,

    /// Add a transaction
    Add(AddArgs),

    /// Show the income and expense summary for a month
    #[command(alias = "report")]
    Summary(SummaryArgs),

    /// List the categories for each transaction type
    Categories,

    /// Write a settings file with the current configuration
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "pocket_ledger=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (paths, settings) = LedgerPaths::resolve(cli.config, cli.file)?;
    let command = cli.command.unwrap_or(Commands::Menu);

    match command {
        Commands::Categories => {
            handle_categories_command(&settings);
            return Ok(());
        }
        Commands::Init => {
            if paths.settings_file().exists() {
                println!("Settings already exist at: {}", paths.settings_file().display());
            } else {
                settings.save(paths.settings_file())?;
                println!("Settings written to: {}", paths.settings_file().display());
            }
            return Ok(());
        }
        Commands::Config => {
            println!("Ledger Configuration");
            println!("====================");
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Transaction file: {}", paths.data_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Load policy:     {:?}", settings.load_policy);
            return Ok(());
        }
        _ => {}
    }

    let (mut store, skipped) =
        TransactionStore::load_with_policy(paths.data_file(), settings.load_policy)?;
    if !skipped.is_empty() {
        eprintln!(
            "Warning: skipped {} unreadable record(s) in {}",
            skipped.len(),
            paths.data_file().display()
        );
    }

    match command {
        Commands::Menu => {
            let stdin = io::stdin();
            Menu::new(stdin.lock(), io::stdout(), &mut store, &settings).run()?;
        }
        Commands::Add(args) => handle_add_command(&mut store, &settings, args)?,
        Commands::Summary(args) => handle_summary_command(&store, &settings, args)?,
        Commands::Categories | Commands::Init | Commands::Config => {}
    }

    Ok(())
}
