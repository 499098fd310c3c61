//! `update` command

mod handler;

use std::path::PathBuf;

use clap::Args;

use super::OutputFormat;

pub use handler::handle_update_command;

#[derive(Args)]
pub struct UpdateCommands {
    /// Master workbook (summary sheet plus one sheet per team)
    pub master: PathBuf,

    /// Addition workbook; its first sheet is merged into the team sheet of the same name
    pub addition: PathBuf,

    /// Write the result here instead of overwriting the master
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Compute and print the result without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Also print the addition sheet as it was read
    #[arg(long)]
    pub preview: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}
