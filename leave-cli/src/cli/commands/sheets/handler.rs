//! Sheets command handler

use anyhow::{Context, Result};
use colored::*;
use std::fs;

use super::SheetsCommands;
use crate::workbook::list_sheets;

pub fn handle_sheets_command(args: SheetsCommands) -> Result<()> {
    let bytes = fs::read(&args.workbook)
        .with_context(|| format!("Failed to read workbook: {}", args.workbook.display()))?;
    let names = list_sheets(&bytes)
        .with_context(|| format!("Invalid Excel file: {}", args.workbook.display()))?;

    if names.is_empty() {
        println!("{}", "Workbook has no sheets".yellow());
        return Ok(());
    }

    for (index, name) in names.iter().enumerate() {
        println!("{}  {}", format!("{:>3}", index).dimmed(), name);
    }

    Ok(())
}
