//! The canonical leave record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::cells::{cell_to_date, cell_to_days, cell_to_name};
use crate::workbook::Cell;

/// Canonical column labels, in positional order
pub const CANONICAL_COLUMNS: [&str; 4] = ["name", "start_date", "end_date", "days"];

/// Number of leading columns that carry a leave record
pub const RECORD_WIDTH: usize = CANONICAL_COLUMNS.len();

/// One period of leave.
///
/// Values that could not be read from the sheet stay `None` (or an empty
/// name); they are carried through rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<f64>,
}

impl LeaveRecord {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate, days: f64) -> Self {
        Self {
            name: name.into(),
            start_date: Some(start_date),
            end_date: Some(end_date),
            days: Some(days),
        }
    }

    /// Build a record from the first four cells of a row
    pub fn from_cells(cells: &[Cell]) -> Self {
        static EMPTY: Cell = Cell::Empty;
        let get = |idx: usize| cells.get(idx).unwrap_or(&EMPTY);
        Self {
            name: cell_to_name(get(0)),
            start_date: cell_to_date(get(1)),
            end_date: cell_to_date(get(2)),
            days: cell_to_days(get(3)),
        }
    }

    /// Cells in canonical column order
    pub fn to_cells(&self) -> Vec<Cell> {
        vec![
            if self.name.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(self.name.clone())
            },
            self.start_date.map(Cell::Date).unwrap_or_default(),
            self.end_date.map(Cell::Date).unwrap_or_default(),
            self.days.map(Cell::Number).unwrap_or_default(),
        ]
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Full identity used for deduplication
    pub fn identity(&self) -> RecordIdentity {
        RecordIdentity {
            name: self.name.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            days: self.days.map(days_bits),
        }
    }

    /// (name, start_date) key used for supersession
    pub fn supersession_key(&self) -> SupersessionKey {
        SupersessionKey {
            name: self.name.clone(),
            start_date: self.start_date,
        }
    }
}

/// Hashable form of (name, start_date, end_date, days)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordIdentity {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    days: Option<u64>,
}

/// (name, start_date)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SupersessionKey {
    pub name: String,
    pub start_date: Option<NaiveDate>,
}

fn days_bits(days: f64) -> u64 {
    // -0.0 and 0.0 must hash alike
    if days == 0.0 { 0.0f64.to_bits() } else { days.to_bits() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_cells_reads_first_four_columns() {
        let cells = vec![
            Cell::text("Alice"),
            Cell::Date(date(2024, 1, 1)),
            Cell::text("2024-01-02"),
            Cell::Number(2.0),
            Cell::text("ignored"),
        ];

        let record = LeaveRecord::from_cells(&cells);
        assert_eq!(record, LeaveRecord::new("Alice", date(2024, 1, 1), date(2024, 1, 2), 2.0));
    }

    #[test]
    fn test_from_short_row_fills_missing() {
        let record = LeaveRecord::from_cells(&[Cell::text("Bob")]);
        assert_eq!(record.name, "Bob");
        assert_eq!(record.start_date, None);
        assert_eq!(record.days, None);
    }

    #[test]
    fn test_identity_distinguishes_days() {
        let a = LeaveRecord::new("Alice", date(2024, 1, 1), date(2024, 1, 2), 2.0);
        let mut b = a.clone();
        b.days = Some(1.5);

        assert_ne!(a.identity(), b.identity());
        assert_eq!(a.supersession_key(), b.supersession_key());
    }

    #[test]
    fn test_to_cells_round_trip() {
        let record = LeaveRecord::new("Alice", date(2024, 1, 1), date(2024, 1, 2), 0.5);
        assert_eq!(LeaveRecord::from_cells(&record.to_cells()), record);
    }
}
