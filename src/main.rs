use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fintrack::cli::{handle_config, handle_init, handle_report_command, ReportCommands, ReportContext};
use fintrack::config::{FintrackPaths, Settings};
use fintrack::storage::FileLedgerSource;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance dashboard for the terminal",
    long_about = "fintrack reads a ledger snapshot of transactions, categories and \
                  budgets and reports balances, monthly income and expenses, spending \
                  by category, a recent balance trend and budget progress."
)]
struct Cli {
    /// Ledger snapshot to read (JSON or YAML)
    #[arg(long, global = true, env = "FINTRACK_LEDGER")]
    ledger: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Write default settings and a sample ledger
    Init {
        /// Replace an existing ledger with the sample
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn init_tracing(settings: &Settings, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fintrack=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("fintrack={}", settings.log_level)))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FintrackPaths::new()?;
    let settings = Settings::load_or_default(&paths)?;
    init_tracing(&settings, cli.verbose);

    let ledger = cli
        .ledger
        .clone()
        .unwrap_or_else(|| settings.resolve_ledger_path(&paths));
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Some(Commands::Report(cmd)) => {
            let source = FileLedgerSource::new(&ledger);
            let ctx = ReportContext::load(&source, settings, today)?;
            handle_report_command(&ctx, cmd)?;
        }
        Some(Commands::Init { force }) => {
            handle_init(&paths, &settings, today, force)?;
        }
        Some(Commands::Config) => {
            handle_config(&paths, &settings, &ledger);
        }
        None => {
            println!("fintrack - personal finance dashboard");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack init' to create a sample ledger.");
        }
    }

    Ok(())
}
