//! Column width reflow

use super::Sheet;

/// Bounds applied when sizing a column to its content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthBounds {
    pub min: f64,
    pub max: f64,
    pub padding: f64,
}

impl Default for WidthBounds {
    fn default() -> Self {
        Self {
            min: 15.0,
            max: 50.0,
            padding: 2.0,
        }
    }
}

/// Width for a column whose longest cell text has `max_len` characters
pub fn column_width(max_len: usize, bounds: &WidthBounds) -> f64 {
    (max_len as f64 + bounds.padding).max(bounds.min).min(bounds.max)
}

/// Recompute every column width of `sheet` from its cell text.
/// Each column is measured independently over all rows, header included.
pub fn reflow_column_widths(sheet: &mut Sheet, bounds: &WidthBounds) {
    let mut longest = vec![0usize; sheet.column_count()];

    for row in &sheet.rows {
        for (col, cell) in row.iter().enumerate() {
            let len = cell.display_text().chars().count();
            if len > longest[col] {
                longest[col] = len;
            }
        }
    }

    sheet.layout.column_widths = longest
        .into_iter()
        .enumerate()
        .map(|(col, len)| (col as u16, column_width(len, bounds)))
        .collect();
}
