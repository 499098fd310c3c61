//! Serialize the workbook model to a fresh xlsx file
//!
//! Only used to build workbooks for tests; real saves edit the master file
//! through `MasterDocument`.

use std::io::{Cursor, Read, Write};

use anyhow::{Context, Result};
use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, FormatAlign, Worksheet};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::{Cell, MergedRange, Sheet, Workbook};

/// Cell formats shared by every sheet
struct Formats {
    date: Format,
    centered: Format,
    centered_date: Format,
}

impl Formats {
    fn new(date_format: &str) -> Self {
        let centered = Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        Self {
            date: Format::new().set_num_format(date_format),
            centered_date: centered.clone().set_num_format(date_format),
            centered,
        }
    }
}

/// Write the whole workbook to an in-memory xlsx file.
/// Dates are written as date cells without a time component.
pub fn write_workbook(workbook: &Workbook, date_format: &str) -> Result<Vec<u8>> {
    let formats = Formats::new(date_format);
    let mut xlsx = rust_xlsxwriter::Workbook::new();

    for sheet in &workbook.sheets {
        let worksheet = xlsx.add_worksheet();
        write_sheet(worksheet, sheet, &formats)
            .with_context(|| format!("Failed to write sheet: {}", sheet.name))?;
    }

    xlsx.save_to_buffer().context("Failed to serialize Excel workbook")
}

fn write_sheet(ws: &mut Worksheet, sheet: &Sheet, formats: &Formats) -> Result<()> {
    ws.set_name(&sheet.name)?;

    for (col, width) in &sheet.layout.column_widths {
        ws.set_column_width(*col, *width)?;
    }

    for range in &sheet.layout.merged {
        let anchor = sheet
            .cell(range.first_row as usize, range.first_col as usize)
            .display_text();
        ws.merge_range(
            range.first_row,
            range.first_col,
            range.last_row,
            range.last_col,
            &anchor,
            &formats.centered,
        )?;
    }

    for (row_idx, cells) in sheet.rows.iter().enumerate() {
        let row = row_idx as u32;
        for (col_idx, cell) in cells.iter().enumerate() {
            let col = col_idx as u16;
            if sheet.layout.merged.iter().any(|m| covers(m, row, col)) {
                continue;
            }
            let centered = sheet.layout.centered.contains(&(row, col));
            write_cell(ws, row, col, cell, centered, formats)?;
        }
    }

    Ok(())
}

fn write_cell(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    centered: bool,
    formats: &Formats,
) -> Result<()> {
    match cell {
        Cell::Empty => { /* Leave cell empty */ }
        Cell::Text(s) => {
            if centered {
                ws.write_string_with_format(row, col, s, &formats.centered)?;
            } else {
                ws.write_string(row, col, s)?;
            }
        }
        Cell::Number(n) => {
            if centered {
                ws.write_number_with_format(row, col, *n, &formats.centered)?;
            } else {
                ws.write_number(row, col, *n)?;
            }
        }
        Cell::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
        Cell::Date(d) => {
            let datetime = ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8)
                .with_context(|| format!("Date out of Excel range: {}", d))?;
            let format = if centered {
                &formats.centered_date
            } else {
                &formats.date
            };
            ws.write_datetime_with_format(row, col, &datetime, format)?;
        }
    }
    Ok(())
}

fn covers(range: &MergedRange, row: u32, col: u16) -> bool {
    (range.first_row..=range.last_row).contains(&row)
        && (range.first_col..=range.last_col).contains(&col)
}

/// Copy an xlsx package, swapping the content of one part
pub fn replace_part(bytes: &[u8], part: &str, content: &[u8]) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::<()>::default().compression_method(CompressionMethod::Stored);

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let name = file.name().to_string();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();

        writer.start_file(name.as_str(), options).unwrap();
        if name == part {
            writer.write_all(content).unwrap();
        } else {
            writer.write_all(&data).unwrap();
        }
    }

    writer.finish().unwrap().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::read_workbook;
    use chrono::NaiveDate;

    #[test]
    fn test_round_trip_preserves_values_and_order() {
        let mut workbook = Workbook::new();

        let mut summary = Sheet::new("Summary");
        summary.set_centered(0, 0, Cell::text("Title"));
        summary.merge(MergedRange {
            first_row: 0,
            first_col: 0,
            last_row: 0,
            last_col: 7,
        });
        summary.set_centered(0, 8, Cell::text("1년"));
        workbook.sheets.push(summary);

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let team = Sheet::with_rows(
            "Team",
            vec![
                vec![Cell::text("name"), Cell::text("start_date"), Cell::text("days")],
                vec![Cell::text("Alice"), Cell::Date(date), Cell::Number(1.5)],
            ],
        );
        workbook.sheets.push(team);

        let bytes = write_workbook(&workbook, "yyyy-mm-dd").unwrap();
        let read_back = read_workbook(&bytes).unwrap();

        assert_eq!(read_back.sheet_names(), vec!["Summary", "Team"]);

        let summary = read_back.sheet("Summary").unwrap();
        assert_eq!(summary.cell(0, 0), &Cell::text("Title"));
        assert_eq!(summary.cell(0, 8), &Cell::text("1년"));

        let team = read_back.sheet("Team").unwrap();
        assert_eq!(team.cell(1, 0), &Cell::text("Alice"));
        assert_eq!(team.cell(1, 1), &Cell::Date(date));
        assert_eq!(team.cell(1, 2), &Cell::Number(1.5));
    }

    #[test]
    fn test_invalid_sheet_name_is_an_error() {
        let mut workbook = Workbook::new();
        workbook.sheets.push(Sheet::new("bad[name]"));

        assert!(write_workbook(&workbook, "yyyy-mm-dd").is_err());
    }
}
