//! Turn an uploaded sheet into canonical leave records

use super::{CANONICAL_COLUMNS, LeaveRecord, LedgerError, RECORD_WIDTH, RawTable};
use crate::workbook::{Cell, Sheet};

/// An uploaded sheet after normalization
#[derive(Debug, Clone)]
pub struct NormalizedSource {
    /// Sheet name; also the team sheet it updates
    pub sheet_name: String,
    /// Every column, for preview
    pub raw: RawTable,
    /// First four columns as records, one per data row
    pub records: Vec<LeaveRecord>,
}

/// Normalize a source sheet.
///
/// The first four columns are taken positionally as name, start date, end
/// date and days. Blank names are filled from the row above (vertically
/// merged cells). Rows are never dropped here.
pub fn normalize_sheet(sheet: &Sheet) -> Result<NormalizedSource, LedgerError> {
    let width = sheet.column_count();
    if width < RECORD_WIDTH {
        return Err(LedgerError::MalformedInput {
            sheet: sheet.name.clone(),
            columns: width,
        });
    }

    let mut headers = sheet.header();
    for (header, canonical) in headers.iter_mut().zip(CANONICAL_COLUMNS) {
        *header = canonical.to_string();
    }

    let mut rows: Vec<Vec<Cell>> = sheet
        .data_rows()
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.resize(width, Cell::Empty);
            row
        })
        .collect();
    forward_fill_names(&mut rows);

    let records = rows.iter().map(|row| LeaveRecord::from_cells(row)).collect();

    log::debug!(
        "Normalized sheet '{}': {} rows, {} columns",
        sheet.name,
        rows.len(),
        width
    );

    Ok(NormalizedSource {
        sheet_name: sheet.name.clone(),
        raw: RawTable { headers, rows },
        records,
    })
}

/// Fill empty cells in column 0 with the nearest non-empty value above.
/// Leading blanks with nothing above stay blank.
pub fn forward_fill_names(rows: &mut [Vec<Cell>]) {
    let mut last: Option<Cell> = None;
    for row in rows.iter_mut() {
        let Some(first) = row.first_mut() else {
            continue;
        };
        if first.is_empty() {
            if let Some(value) = &last {
                *first = value.clone();
            }
        } else {
            last = Some(first.clone());
        }
    }
}
