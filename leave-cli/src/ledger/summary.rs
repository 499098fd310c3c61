//! Yearly summary across every team sheet
//!
//! Each person's leave is totalled per calendar year, then the years are
//! relabelled as service years (the person's first year on record is year 1,
//! the next year with any leave is year 2, and so on). The result is pivoted
//! into one row per person and written as the first sheet of the workbook.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use super::{LeaveRecord, RECORD_WIDTH};
use crate::config::{LedgerConfig, SummaryConfig};
use crate::workbook::{Cell, MergedRange, Sheet, Workbook};

/// One person's row in the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Name of the first sheet the person appears in
    pub sheet_label: String,
    pub name: String,
    /// Days per service year; index 0 is service year 1
    pub service_days: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySummary {
    pub rows: Vec<SummaryRow>,
}

/// Outcome of a summary rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryStatus {
    Built { rows: usize },
    /// No sheet had usable data; any prior summary was left as is
    Skipped,
}

/// Per-person yearly totals collected from the team sheets
#[derive(Default)]
struct PersonYears {
    first_sheet: usize,
    years: BTreeMap<i32, f64>,
}

/// Scan every team sheet and build the summary.
///
/// Sheet 0 and any sheet named like the summary are skipped. Returns `None`
/// when no sheet contributes a valid row.
pub fn build_yearly_summary(workbook: &Workbook, config: &SummaryConfig) -> Option<YearlySummary> {
    let mut people: BTreeMap<String, PersonYears> = BTreeMap::new();
    let mut contributed = false;

    for (order, sheet) in workbook.sheets.iter().enumerate().skip(1) {
        if sheet.name == config.sheet_name {
            continue;
        }
        if let Some(reason) = &sheet.read_error {
            log::warn!("Skipping sheet '{}' in summary: {}", sheet.name, reason);
            continue;
        }

        let columns = sheet.column_count();
        if columns < RECORD_WIDTH {
            log::info!(
                "Skipping sheet '{}' in summary: {} column(s)",
                sheet.name,
                columns
            );
            continue;
        }

        for row in sheet.data_rows() {
            let record = LeaveRecord::from_cells(row);
            if !record.has_name() {
                continue;
            }
            let (Some(start), Some(days)) = (record.start_date, record.days) else {
                continue;
            };

            contributed = true;
            let person = people.entry(record.name).or_insert_with(|| PersonYears {
                first_sheet: order,
                years: BTreeMap::new(),
            });
            person.first_sheet = person.first_sheet.min(order);
            *person.years.entry(start.year()).or_default() += days;
        }
    }

    if !contributed {
        log::info!("No leave data found for the yearly summary");
        return None;
    }

    let mut ordered: Vec<(usize, String, PersonYears)> = people
        .into_iter()
        .map(|(name, person)| (person.first_sheet, name, person))
        .collect();
    ordered.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let rows = ordered
        .into_iter()
        .map(|(order, name, person)| SummaryRow {
            sheet_label: workbook.sheets[order].name.clone(),
            service_days: service_year_days(&person.years, config.max_service_years),
            name,
        })
        .collect();

    Some(YearlySummary { rows })
}

/// Relabel calendar years as service years 1..=max, padding with zeros.
/// Years past `max` are dropped.
pub fn service_year_days(years: &BTreeMap<i32, f64>, max: usize) -> Vec<f64> {
    let mut days = vec![0.0; max];
    for (slot, total) in days.iter_mut().zip(years.values()) {
        *slot = *total;
    }
    if years.len() > max {
        log::debug!("{} service year(s) beyond {} not shown", years.len() - max, max);
    }
    days
}

/// Lay out the summary sheet
pub fn render_summary_sheet(summary: &YearlySummary, config: &LedgerConfig) -> Sheet {
    let settings = &config.summary;
    let mut sheet = Sheet::new(settings.sheet_name.clone());
    let first_col = settings.first_data_column.saturating_sub(1) as usize;

    sheet.set_centered(0, 0, Cell::text(settings.title.clone()));
    if settings.title_span > 1 {
        sheet.merge(MergedRange {
            first_row: 0,
            first_col: 0,
            last_row: 0,
            last_col: settings.title_span - 1,
        });
    }

    sheet.set_cell(1, 0, Cell::text(settings.team_header.clone()));
    sheet.set_cell(1, 1, Cell::text(settings.name_header.clone()));

    for year in 1..=settings.max_service_years {
        let col = first_col + year - 1;
        sheet.set_centered(0, col, Cell::text(settings.year_label(year)));
        let allotment = config.entitlement.days_for(year);
        sheet.set_centered(
            1,
            col,
            Cell::text(format!("{}{}", allotment, settings.entitlement_suffix)),
        );
    }

    for (i, row) in summary.rows.iter().enumerate() {
        let r = i + 2;
        sheet.set_cell(r, 0, Cell::text(row.sheet_label.clone()));
        sheet.set_cell(r, 1, Cell::text(row.name.clone()));
        for (offset, days) in row.service_days.iter().enumerate() {
            if *days > 0.0 {
                sheet.set_centered(r, first_col + offset, Cell::Number(*days));
            }
        }
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record_row(name: &str, y: i32, m: u32, days: f64) -> Vec<Cell> {
        let date = NaiveDate::from_ymd_opt(y, m, 1).unwrap();
        vec![
            Cell::text(name),
            Cell::Date(date),
            Cell::Date(date),
            Cell::Number(days),
        ]
    }

    fn team_sheet(name: &str, rows: Vec<Vec<Cell>>) -> Sheet {
        let mut all = vec![vec![
            Cell::text("name"),
            Cell::text("start_date"),
            Cell::text("end_date"),
            Cell::text("days"),
        ]];
        all.extend(rows);
        Sheet::with_rows(name, all)
    }

    fn workbook() -> Workbook {
        let mut wb = Workbook::new();
        wb.sheets.push(Sheet::new("재현이네"));
        wb.sheets.push(team_sheet(
            "Team B",
            vec![
                record_row("Kim", 2021, 3, 2.0),
                record_row("Kim", 2021, 9, 1.0),
                record_row("Kim", 2023, 1, 3.0),
                record_row("Kim", 2024, 5, 1.5),
                record_row("  ", 2024, 5, 9.0),
            ],
        ));
        wb.sheets.push(team_sheet(
            "Team A",
            vec![
                record_row("Lee", 2022, 1, 4.0),
                record_row("Ahn", 2020, 1, 1.0),
                record_row("Kim", 2024, 6, 0.5),
            ],
        ));
        wb.sheets.push(Sheet::with_rows(
            "Notes",
            vec![vec![Cell::text("memo")], vec![Cell::text("x")]],
        ));
        wb
    }

    #[test]
    fn test_service_year_remap_skips_gaps() {
        let summary = build_yearly_summary(&workbook(), &SummaryConfig::default()).unwrap();
        let kim = summary.rows.iter().find(|r| r.name == "Kim").unwrap();

        assert_eq!(kim.service_days.len(), 20);
        assert_eq!(&kim.service_days[..4], &[3.0, 3.0, 2.0, 0.0]);
        assert_eq!(kim.sheet_label, "Team B");
    }

    #[test]
    fn test_rows_ordered_by_first_sheet_then_name() {
        let summary = build_yearly_summary(&workbook(), &SummaryConfig::default()).unwrap();
        let names: Vec<(&str, &str)> = summary
            .rows
            .iter()
            .map(|r| (r.sheet_label.as_str(), r.name.as_str()))
            .collect();

        assert_eq!(
            names,
            vec![("Team B", "Kim"), ("Team A", "Ahn"), ("Team A", "Lee")]
        );
    }

    #[test]
    fn test_years_beyond_max_are_dropped() {
        let years: BTreeMap<i32, f64> = (2000..2025).map(|y| (y, 1.0)).collect();
        let days = service_year_days(&years, 20);

        assert_eq!(days.len(), 20);
        assert!(days.iter().all(|d| *d == 1.0));
    }

    #[test]
    fn test_no_data_builds_nothing() {
        let mut wb = Workbook::new();
        wb.sheets.push(Sheet::with_rows("재현이네", vec![vec![Cell::text("old")]]));
        wb.sheets.push(team_sheet("Team A", vec![]));

        assert_eq!(build_yearly_summary(&wb, &SummaryConfig::default()), None);
    }

    #[test]
    fn test_unreadable_sheets_are_skipped() {
        let mut wb = workbook();
        wb.sheets[1] = Sheet::unreadable("Team B", "unexpected end of file");

        let summary = build_yearly_summary(&wb, &SummaryConfig::default()).unwrap();
        let names: Vec<&str> = summary.rows.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["Ahn", "Kim", "Lee"]);
        assert!(summary.rows.iter().all(|r| r.sheet_label == "Team A"));
    }

    #[test]
    fn test_rendered_layout() {
        let config = LedgerConfig::default();
        let summary = build_yearly_summary(&workbook(), &config.summary).unwrap();
        assert_eq!(summary.rows.len(), 3);

        let sheet = render_summary_sheet(&summary, &config);
        assert_eq!(sheet.name, "재현이네");
        assert_eq!(sheet.cell(0, 0), &Cell::text("재현이네"));
        assert_eq!(
            sheet.layout.merged,
            vec![MergedRange {
                first_row: 0,
                first_col: 0,
                last_row: 0,
                last_col: 7
            }]
        );
        assert_eq!(sheet.cell(0, 8), &Cell::text("1년"));
        assert_eq!(sheet.cell(0, 27), &Cell::text("20년"));
        assert_eq!(sheet.cell(1, 0), &Cell::text("team"));
        assert_eq!(sheet.cell(1, 1), &Cell::text("name"));

        let entitlements: Vec<String> = (8..14).map(|c| sheet.cell(1, c).display_text()).collect();
        assert_eq!(entitlements, vec!["11개", "15개", "15개", "16개", "16개", "17개"]);

        assert_eq!(sheet.cell(2, 0), &Cell::text("Team B"));
        assert_eq!(sheet.cell(2, 1), &Cell::text("Kim"));
        assert_eq!(sheet.cell(2, 8), &Cell::Number(3.0));
        // zero days stay blank
        assert_eq!(sheet.cell(2, 11), &Cell::Empty);
        assert!(sheet.layout.centered.contains(&(2, 8)));
    }

    #[test]
    fn test_first_sheet_and_old_summary_are_not_read() {
        let mut wb = workbook();
        wb.sheets.swap(0, 1);
        // "Team B" is now sheet 0 and excluded; the old summary sits at index 1
        let summary = build_yearly_summary(&wb, &SummaryConfig::default()).unwrap();

        assert_eq!(summary.rows.len(), 3);
        assert!(summary.rows.iter().all(|r| r.sheet_label == "Team A"));
        let kim = summary.rows.iter().find(|r| r.name == "Kim").unwrap();
        assert_eq!(kim.service_days[0], 0.5);
    }
}
