//! Editable copy of the master workbook
//!
//! The master file is parsed once with `umya_spreadsheet`. Replacing a sheet
//! rebuilds that sheet only; every other sheet is written back as it was read,
//! formulas, styles and merges included.

use std::io::Cursor;

use anyhow::{Context, Result, anyhow};
use umya_spreadsheet::{HorizontalAlignmentValues, Spreadsheet, VerticalAlignmentValues, Worksheet};

use super::{Cell, Sheet, column_letter, date_to_serial};

pub struct MasterDocument {
    book: Spreadsheet,
    date_format: String,
}

impl MasterDocument {
    /// Parse workbook bytes. Dates written later use `date_format`.
    pub fn open(bytes: &[u8], date_format: &str) -> Result<Self> {
        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)
            .context("Failed to open Excel workbook for editing")?;
        Ok(Self {
            book,
            date_format: date_format.to_string(),
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.book
            .get_sheet_collection()
            .iter()
            .position(|ws| ws.get_name() == name)
    }

    /// Rebuild the sheet named like `sheet` where it stands, or append it.
    /// Returns the sheet's index.
    pub fn replace_or_append(&mut self, sheet: &Sheet) -> Result<usize> {
        let index = self
            .position(&sheet.name)
            .unwrap_or_else(|| self.book.get_sheet_collection().len());
        self.put_sheet(index, sheet)?;
        Ok(index)
    }

    /// Drop any sheet with the same name, then place `sheet` at `index`
    pub fn insert_replacing(&mut self, index: usize, sheet: &Sheet) -> Result<()> {
        self.put_sheet(index, sheet)
    }

    fn put_sheet(&mut self, index: usize, sheet: &Sheet) -> Result<()> {
        if self.position(&sheet.name).is_some() {
            self.book
                .remove_sheet_by_name(&sheet.name)
                .map_err(|e| anyhow!("Failed to remove sheet '{}': {}", sheet.name, e))?;
        }

        let worksheet = self
            .book
            .new_sheet(sheet.name.as_str())
            .map_err(|e| anyhow!("Failed to create sheet '{}': {}", sheet.name, e))?;
        write_sheet(worksheet, sheet, &self.date_format);

        // new_sheet appends; rotate it into place
        let sheets = self.book.get_sheet_collection_mut();
        let last = sheets.len() - 1;
        sheets[index.min(last)..=last].rotate_right(1);

        log::debug!("Sheet '{}' rebuilt at index {}", sheet.name, index.min(last));
        Ok(())
    }

    /// Serialize to xlsx bytes
    pub fn save(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&self.book, &mut buffer)
            .context("Failed to serialize Excel workbook")?;
        Ok(buffer.into_inner())
    }
}

/// 1-based (column, row) as umya expects
fn coordinate(row: usize, col: usize) -> (u32, u32) {
    (col as u32 + 1, row as u32 + 1)
}

fn write_sheet(ws: &mut Worksheet, sheet: &Sheet, date_format: &str) {
    for (col, width) in &sheet.layout.column_widths {
        ws.get_column_dimension_mut(&column_letter(*col)).set_width(*width);
    }

    for (row, cells) in sheet.rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            write_cell(ws, coordinate(row, col), cell, date_format);
        }
    }

    for (row, col) in &sheet.layout.centered {
        let alignment = ws
            .get_style_mut(coordinate(*row as usize, *col as usize))
            .get_alignment_mut();
        alignment.set_horizontal(HorizontalAlignmentValues::Center);
        alignment.set_vertical(VerticalAlignmentValues::Center);
    }

    for range in &sheet.layout.merged {
        ws.add_merge_cells(range.reference());
    }
}

fn write_cell(ws: &mut Worksheet, at: (u32, u32), cell: &Cell, date_format: &str) {
    match cell {
        Cell::Empty => { /* Leave cell empty */ }
        Cell::Text(s) => {
            ws.get_cell_mut(at).set_value_string(s.as_str());
        }
        Cell::Number(n) => {
            ws.get_cell_mut(at).set_value_number(*n);
        }
        Cell::Bool(b) => {
            ws.get_cell_mut(at).set_value_bool(*b);
        }
        Cell::Date(d) => {
            // Date only: a whole serial, shown without a time part
            ws.get_cell_mut(at).set_value_number(date_to_serial(*d));
            ws.get_style_mut(at)
                .get_number_format_mut()
                .set_format_code(date_format);
        }
    }
}
