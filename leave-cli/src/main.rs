use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod cli;
mod config;
mod ledger;
mod services;
mod workbook;

use cli::{
    Commands, handle_inquire_command, handle_sheets_command, handle_summary_command,
    handle_update_command,
};
use config::LedgerConfig;

#[derive(Parser)]
#[command(name = "leave-cli")]
#[command(version, about = "Reconcile team leave spreadsheets into a master workbook", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (overrides LEAVE_LEDGER_CONFIG)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = LedgerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Update(args) => handle_update_command(args, &config),
        Commands::Inquire(args) => handle_inquire_command(args),
        Commands::Summary(args) => handle_summary_command(args, &config),
        Commands::Sheets(args) => handle_sheets_command(args),
    }
}

/// `RUST_LOG` wins over `-v`
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
