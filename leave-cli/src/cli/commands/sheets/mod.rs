//! `sheets` command

mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_sheets_command;

#[derive(Args)]
pub struct SheetsCommands {
    /// Workbook to inspect
    pub workbook: PathBuf,
}
