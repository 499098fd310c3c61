//! Inquire command handler

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

use super::{InquireCommands, OutputFormat};
use crate::cli::output::{TextTable, format_days, records_table};
use crate::ledger::{InquiryReport, MemberDetail};
use crate::services::{InquiryOutcome, run_inquiry};

pub fn handle_inquire_command(args: InquireCommands) -> Result<()> {
    let master = fs::read(&args.master)
        .with_context(|| format!("Failed to read master workbook: {}", args.master.display()))?;

    let outcome = run_inquiry(&master, args.sheet.as_deref(), args.member.as_deref())
        .with_context(|| format!("Failed to inquire {}", args.master.display()))?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .context("Failed to format JSON output")?;
            println!("{}", json);
        }
        OutputFormat::Table => print_outcome(&outcome, args.member.as_deref()),
    }

    if let Some(path) = &args.export {
        export_members(&outcome.report, path)?;
        if matches!(args.format, OutputFormat::Table) {
            println!("Exported to {}", path.display().to_string().bright_green());
        }
    }

    Ok(())
}

fn print_outcome(outcome: &InquiryOutcome, member: Option<&str>) {
    let report = &outcome.report;
    println!("Team sheet: {}", report.sheet_name.bright_cyan().bold());

    if !report.had_data {
        println!("{}", "No records in this sheet".yellow());
        return;
    }

    println!(
        "{} people, {} records, {} days",
        report.total_members.to_string().bold(),
        report.total_records.to_string().bold(),
        format_days(Some(report.total_days)).bold()
    );
    println!();
    print!("{}", ranking_table(report).render());

    match (&outcome.detail, member) {
        (Some(detail), _) => {
            println!();
            print_detail(detail);
        }
        (None, Some(name)) => {
            println!();
            println!("{}", format!("No records for '{}'", name).yellow());
        }
        (None, None) => {}
    }
}

fn ranking_table(report: &InquiryReport) -> TextTable {
    let mut table = TextTable::new(["#", "name", "total_days", "records"])
        .align_right(0)
        .align_right(2)
        .align_right(3);
    for (rank, member) in report.members.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            member.name.clone(),
            format_days(Some(member.total_days)),
            member.record_count.to_string(),
        ]);
    }
    table
}

fn print_detail(detail: &MemberDetail) {
    println!(
        "{}: {} days over {} records",
        detail.name.bright_cyan().bold(),
        format_days(Some(detail.total_days)).bold(),
        detail.record_count
    );
    print!("{}", records_table(&detail.records).render());
}

/// Write the ranked member summary as CSV
fn export_members(report: &InquiryReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    for member in &report.members {
        writer
            .serialize(member)
            .with_context(|| format!("Failed to write CSV row for {}", member.name))?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    log::info!("Exported {} member(s) to {}", report.members.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{LeaveRecord, TeamTable, build_report};
    use chrono::NaiveDate;

    #[test]
    fn test_export_members_writes_ranked_rows() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = TeamTable::new(vec![
            LeaveRecord::new("Alice", date, date, 1.0),
            LeaveRecord::new("Bob", date, date, 2.5),
        ]);
        let report = build_report("Team A", &table, true);

        let dir = std::env::temp_dir().join(format!("leave-cli-export-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("members.csv");

        export_members(&report, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(
            content,
            "name,total_days,record_count\nBob,2.5,1\nAlice,1.0,1\n"
        );
    }

    #[test]
    fn test_ranking_table_numbers_rows() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table = TeamTable::new(vec![LeaveRecord::new("Alice", date, date, 1.0)]);
        let report = build_report("Team A", &table, true);

        let rendered = ranking_table(&report).render();
        let row = rendered.lines().nth(2).unwrap();
        assert!(row.starts_with("1  Alice"));
    }
}
