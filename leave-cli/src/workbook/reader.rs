//! Read xlsx content into the workbook model

use std::io::Cursor;

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Xlsx};
use chrono::NaiveDate;

use super::{Cell, Sheet, Workbook, serial_to_date};

/// Read every sheet of an xlsx file held in memory.
///
/// Only a workbook that cannot be opened is an error. A sheet whose cells
/// fail to parse keeps its place in the order as [`Sheet::unreadable`].
pub fn read_workbook(bytes: &[u8]) -> Result<Workbook> {
    let mut xlsx: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).context("Failed to open Excel workbook")?;

    let mut workbook = Workbook::new();
    for name in xlsx.sheet_names() {
        let sheet = match xlsx.worksheet_range(&name) {
            Ok(range) => sheet_from_range(&name, &range),
            Err(e) => {
                log::warn!("Could not read sheet '{}': {}", name, e);
                Sheet::unreadable(name.as_str(), e.to_string())
            }
        };
        workbook.sheets.push(sheet);
    }

    log::debug!("Read workbook with sheets {:?}", workbook.sheet_names());
    Ok(workbook)
}

/// Sheet names in workbook order
pub fn list_sheets(bytes: &[u8]) -> Result<Vec<String>> {
    let xlsx: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).context("Failed to open Excel workbook")?;
    Ok(xlsx.sheet_names())
}

fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);

    // calamine ranges start at the first used cell, not at A1
    let Some((start_row, start_col)) = range.start() else {
        return sheet;
    };

    for (r, row) in range.rows().enumerate() {
        for (c, data) in row.iter().enumerate() {
            let cell = convert_cell(data);
            if cell != Cell::Empty {
                sheet.set_cell(start_row as usize + r, start_col as usize + c, cell);
            }
        }
    }

    sheet
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            serial_to_date(serial)
                .map(Cell::Date)
                .unwrap_or(Cell::Number(serial))
        }
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
    }
}
