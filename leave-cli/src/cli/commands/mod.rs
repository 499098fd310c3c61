//! Subcommands

pub mod inquire;
pub mod sheets;
pub mod summary;
pub mod update;

use clap::{Subcommand, ValueEnum};

pub use inquire::{InquireCommands, handle_inquire_command};
pub use sheets::{SheetsCommands, handle_sheets_command};
pub use summary::{SummaryCommands, handle_summary_command};
pub use update::{UpdateCommands, handle_update_command};

#[derive(Subcommand)]
pub enum Commands {
    /// Merge an addition file into the master workbook
    Update(UpdateCommands),
    /// Show per-person leave totals for one team sheet
    Inquire(InquireCommands),
    /// Rebuild the yearly summary sheet
    Summary(SummaryCommands),
    /// List the sheets of a workbook
    Sheets(SheetsCommands),
}

/// How results are printed
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
