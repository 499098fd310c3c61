//! Tables of leave records

use serde::Serialize;

use super::{CANONICAL_COLUMNS, LeaveRecord};
use crate::workbook::{Cell, Sheet};

/// Ordered leave records of one team sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamTable {
    pub records: Vec<LeaveRecord>,
}

impl TeamTable {
    pub fn new(records: Vec<LeaveRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LeaveRecord> {
        self.records.iter()
    }

    /// Render as a sheet: canonical header row followed by one row per record
    pub fn to_sheet(&self, name: &str) -> Sheet {
        let mut rows = Vec::with_capacity(self.records.len() + 1);
        rows.push(CANONICAL_COLUMNS.iter().map(|c| Cell::text(*c)).collect());
        rows.extend(self.records.iter().map(LeaveRecord::to_cells));
        Sheet::with_rows(name, rows)
    }
}

/// The uploaded sheet as read, for preview. Keeps every column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}
