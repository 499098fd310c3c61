//! Summary command handler

use anyhow::{Context, Result};
use colored::*;
use std::fs;

use super::SummaryCommands;
use crate::config::LedgerConfig;
use crate::ledger::SummaryStatus;
use crate::services::{run_summary, write_artifact};

pub fn handle_summary_command(args: SummaryCommands, config: &LedgerConfig) -> Result<()> {
    let master = fs::read(&args.master)
        .with_context(|| format!("Failed to read master workbook: {}", args.master.display()))?;

    let outcome = run_summary(&master, config)
        .with_context(|| format!("Failed to rebuild summary of {}", args.master.display()))?;

    match (outcome.status, outcome.artifact) {
        (SummaryStatus::Built { rows }, Some(artifact)) => {
            let target = args.output.as_ref().unwrap_or(&args.master);
            write_artifact(target, &artifact)?;
            println!(
                "Sheet '{}' rebuilt with {} people, saved to {}",
                config.summary.sheet_name.bright_cyan(),
                rows.to_string().bold(),
                target.display().to_string().bright_green()
            );
        }
        _ => {
            println!(
                "{}",
                "No leave data found in any team sheet; summary left unchanged".yellow()
            );
        }
    }

    Ok(())
}
