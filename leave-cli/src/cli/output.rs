//! Terminal rendering helpers
//!
//! Names are often Korean, which take two terminal columns per character, so
//! padding is computed with `unicode-width` rather than `len()`.

use colored::*;
use unicode_width::UnicodeWidthStr;

use crate::ledger::LeaveRecord;
use crate::workbook::format_number;

/// Simple aligned text table
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    right_aligned: Vec<bool>,
}

impl TextTable {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let right_aligned = vec![false; headers.len()];
        Self {
            headers,
            rows: Vec::new(),
            right_aligned,
        }
    }

    /// Right-align a column (numbers)
    pub fn align_right(mut self, column: usize) -> Self {
        if let Some(flag) = self.right_aligned.get_mut(column) {
            *flag = true;
        }
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (col, value) in row.iter().enumerate() {
                if col < widths.len() {
                    widths[col] = widths[col].max(value.width());
                }
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let header: Vec<String> = self
            .headers
            .iter()
            .enumerate()
            .map(|(col, h)| pad(h, widths[col], self.right_aligned[col]))
            .collect();
        out.push_str(&header.join("  ").bold().to_string());
        out.push('\n');

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("  ").dimmed().to_string());
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(col, width)| {
                    let value = row.get(col).map(String::as_str).unwrap_or("");
                    pad(value, *width, self.right_aligned[col])
                })
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }

        out
    }
}

/// Pad `text` to `width` terminal columns
pub fn pad(text: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if right {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

pub fn format_days(days: Option<f64>) -> String {
    days.map(format_number).unwrap_or_else(|| "-".to_string())
}

/// Table of leave records in canonical column order
pub fn records_table(records: &[LeaveRecord]) -> TextTable {
    let mut table = TextTable::new(["name", "start_date", "end_date", "days"]).align_right(3);
    for record in records {
        table.add_row(vec![
            record.name.clone(),
            record
                .start_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            record
                .end_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            format_days(record.days),
        ]);
    }
    table
}
