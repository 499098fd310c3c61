//! `summary` command

mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_summary_command;

#[derive(Args)]
pub struct SummaryCommands {
    /// Master workbook
    pub master: PathBuf,

    /// Write the result here instead of overwriting the master
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
