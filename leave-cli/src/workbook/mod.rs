//! In-memory workbook model and xlsx import/export
//!
//! Cell values are read with `calamine` into the plain model below, which the
//! ledger transforms work on. Saving goes through [`MasterDocument`], an
//! editable `umya_spreadsheet` copy of the master file, so only the sheets
//! that are replaced get rewritten.

mod document;
pub mod layout;
mod reader;
#[cfg(test)]
mod writer;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

pub use document::MasterDocument;
pub use layout::{WidthBounds, reflow_column_widths};
pub use reader::{list_sheets, read_workbook};
#[cfg(test)]
pub use writer::{replace_part, write_workbook};

/// A single cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// True for missing cells and empty strings
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Text shown for the cell, also used for column width measurement
    pub fn display_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        }
    }
}

/// Format a number without a trailing `.0` for whole values
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Convert an Excel serial day number (1900 date system) to a date
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    // Excel counts a phantom 1900-02-29 (serial 60), so earlier serials shift by one.
    if !serial.is_finite() || serial < 1.0 || serial >= 2_958_466.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = serial.floor() as i64;
    let days = if days < 60 { days + 1 } else { days };
    epoch.checked_add_signed(chrono::Duration::days(days))
}

/// Day number of 1899-12-30 counted from 0001-01-01
const SERIAL_EPOCH_CE: i32 = 693_594;

/// Excel serial day number of a date, the inverse of [`serial_to_date`]
pub fn date_to_serial(date: NaiveDate) -> f64 {
    let days = date.num_days_from_ce() - SERIAL_EPOCH_CE;
    let days = if days <= 60 { days - 1 } else { days };
    days as f64
}

/// Column letters for a zero-based column index (0 -> A, 26 -> AA)
pub fn column_letter(col: u16) -> String {
    let mut n = col as u32 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Inclusive merged cell range, zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl MergedRange {
    /// A1-style reference, e.g. `A1:H1`
    pub fn reference(&self) -> String {
        format!(
            "{}{}:{}{}",
            column_letter(self.first_col),
            self.first_row + 1,
            column_letter(self.last_col),
            self.last_row + 1
        )
    }
}

/// Presentation details kept alongside the cell grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetLayout {
    pub column_widths: BTreeMap<u16, f64>,
    pub merged: Vec<MergedRange>,
    pub centered: BTreeSet<(u32, u16)>,
}

/// A named sheet. Rows are absolute from A1.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
    pub layout: SheetLayout,
    /// Set when the sheet is listed in the workbook but its cells could not
    /// be read; `rows` is then empty
    pub read_error: Option<String>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rows(name, Vec::new())
    }

    pub fn with_rows(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
            layout: SheetLayout::default(),
            read_error: None,
        }
    }

    pub fn unreadable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            read_error: Some(reason.into()),
            ..Self::new(name)
        }
    }

    /// Width of the widest row
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }

    /// Set a cell, growing the grid as needed
    pub fn set_cell(&mut self, row: usize, col: usize, value: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Empty);
        }
        cells[col] = value;
    }

    pub fn set_centered(&mut self, row: usize, col: usize, value: Cell) {
        self.set_cell(row, col, value);
        self.layout.centered.insert((row as u32, col as u16));
    }

    pub fn merge(&mut self, range: MergedRange) {
        self.layout.merged.push(range);
    }

    /// Header row (row 1) labels
    pub fn header(&self) -> Vec<String> {
        let width = self.column_count();
        (0..width).map(|c| self.cell(0, c).display_text()).collect()
    }

    /// Rows below the header
    pub fn data_rows(&self) -> &[Vec<Cell>] {
        if self.rows.len() > 1 { &self.rows[1..] } else { &[] }
    }
}

/// Ordered collection of sheets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name == name)
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Replace the sheet with the same name in place, or append it.
    /// Returns the sheet's index.
    pub fn replace_or_append(&mut self, sheet: Sheet) -> usize {
        match self.position(&sheet.name) {
            Some(idx) => {
                self.sheets[idx] = sheet;
                idx
            }
            None => {
                self.sheets.push(sheet);
                self.sheets.len() - 1
            }
        }
    }

    /// Drop any sheet with the same name, then insert at `index`
    pub fn insert_replacing(&mut self, index: usize, sheet: Sheet) {
        self.sheets.retain(|s| s.name != sheet.name);
        let index = index.min(self.sheets.len());
        self.sheets.insert(index, sheet);
    }
}
