//! Update command handler

use anyhow::{Context, Result};
use colored::*;
use std::fs;

use super::{OutputFormat, UpdateCommands};
use crate::cli::output::{TextTable, records_table};
use crate::config::LedgerConfig;
use crate::ledger::{RawTable, SummaryStatus};
use crate::services::{UpdateOutcome, run_update, write_artifact};

pub fn handle_update_command(args: UpdateCommands, config: &LedgerConfig) -> Result<()> {
    let master = fs::read(&args.master)
        .with_context(|| format!("Failed to read master workbook: {}", args.master.display()))?;
    let addition = fs::read(&args.addition)
        .with_context(|| format!("Failed to read addition file: {}", args.addition.display()))?;

    let outcome = run_update(&master, &addition, config)
        .with_context(|| format!("Failed to update {}", args.master.display()))?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .context("Failed to format JSON output")?;
            println!("{}", json);
        }
        OutputFormat::Table => print_outcome(&outcome, args.preview),
    }

    if args.dry_run {
        log::info!("Dry run, nothing written");
        if matches!(args.format, OutputFormat::Table) {
            println!("{}", "Dry run: no file written".yellow());
        }
        return Ok(());
    }

    let target = args.output.as_ref().unwrap_or(&args.master);
    write_artifact(target, &outcome.artifact)?;
    if matches!(args.format, OutputFormat::Table) {
        println!("Saved to {}", target.display().to_string().bright_green());
    }

    Ok(())
}

fn print_outcome(outcome: &UpdateOutcome, preview: bool) {
    println!("Team sheet: {}", outcome.sheet_name.bright_cyan().bold());

    if preview {
        println!();
        println!("{}", "Addition as read:".bold());
        print!("{}", raw_table(&outcome.raw_source).render());
    }

    if !outcome.had_data() {
        println!(
            "{}",
            "Team sheet was missing or empty; it is created from the addition".yellow()
        );
    }

    println!();
    let count = outcome.new_record_count();
    if count == 0 {
        println!("{}", "No new records".dimmed());
    } else {
        println!("New records: {}", count.to_string().bright_green().bold());
        print!("{}", records_table(&outcome.new_records).render());
    }

    println!();
    println!(
        "Updated table ({} records):",
        outcome.updated.len().to_string().bold()
    );
    print!("{}", records_table(&outcome.updated.records).render());

    println!();
    match outcome.summary {
        SummaryStatus::Built { rows } => println!("Yearly summary rebuilt: {} people", rows),
        SummaryStatus::Skipped => {
            println!("{}", "Yearly summary skipped: no leave data".yellow())
        }
    }
}

fn raw_table(raw: &RawTable) -> TextTable {
    let mut table = TextTable::new(raw.headers.iter().cloned());
    for row in &raw.rows {
        table.add_row(row.iter().map(|cell| cell.display_text()).collect());
    }
    table
}
