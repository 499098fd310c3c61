//! `inquire` command

mod handler;

use std::path::PathBuf;

use clap::Args;

use super::OutputFormat;

pub use handler::handle_inquire_command;

#[derive(Args)]
pub struct InquireCommands {
    /// Master workbook
    pub master: PathBuf,

    /// Team sheet to report on (default: the first team sheet)
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Show the individual records of one person
    #[arg(short, long)]
    pub member: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the ranked member summary to a CSV file
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}
