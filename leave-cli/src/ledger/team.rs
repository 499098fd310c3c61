//! Loading an existing team table from the master workbook

use super::{LeaveRecord, RECORD_WIDTH, TeamTable};
use crate::workbook::{Workbook, read_workbook};

/// Why a team table came back the way it did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamSheetStatus {
    Loaded,
    /// No sheet with that name
    Absent,
    /// Sheet exists but has no columns or no data rows
    Empty,
    /// Sheet exists but has fewer than four columns
    Malformed { columns: usize },
    /// The workbook or the sheet's cells could not be read
    Unreadable(String),
}

/// A team table plus how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTeamTable {
    pub table: TeamTable,
    pub status: TeamSheetStatus,
}

impl LoadedTeamTable {
    fn empty(status: TeamSheetStatus) -> Self {
        Self {
            table: TeamTable::default(),
            status,
        }
    }

    /// True only when existing records were read
    pub fn had_data(&self) -> bool {
        self.status == TeamSheetStatus::Loaded
    }
}

/// Load a team table. Never fails; problems come back as an empty table.
pub fn load_team_table(workbook: &Workbook, sheet_name: &str) -> LoadedTeamTable {
    let Some(sheet) = workbook.sheet(sheet_name) else {
        log::info!("Team sheet '{}' not found, starting from an empty table", sheet_name);
        return LoadedTeamTable::empty(TeamSheetStatus::Absent);
    };

    if let Some(reason) = &sheet.read_error {
        log::warn!("Team sheet '{}' could not be read, treating it as empty", sheet_name);
        return LoadedTeamTable::empty(TeamSheetStatus::Unreadable(reason.clone()));
    }

    let columns = sheet.column_count();
    if columns == 0 || sheet.data_rows().is_empty() {
        log::info!("Team sheet '{}' is empty", sheet_name);
        return LoadedTeamTable::empty(TeamSheetStatus::Empty);
    }

    if columns < RECORD_WIDTH {
        log::warn!(
            "Team sheet '{}' has only {} column(s), treating it as empty",
            sheet_name,
            columns
        );
        return LoadedTeamTable::empty(TeamSheetStatus::Malformed { columns });
    }

    let records: Vec<LeaveRecord> = sheet
        .data_rows()
        .iter()
        .filter(|row| row.iter().take(RECORD_WIDTH).any(|cell| !cell.is_empty()))
        .map(|row| LeaveRecord::from_cells(row))
        .collect();

    log::debug!("Loaded {} record(s) from team sheet '{}'", records.len(), sheet_name);

    LoadedTeamTable {
        table: TeamTable::new(records),
        status: TeamSheetStatus::Loaded,
    }
}

/// Load a team table straight from workbook bytes
pub fn load_team_table_from_bytes(bytes: &[u8], sheet_name: &str) -> LoadedTeamTable {
    match read_workbook(bytes) {
        Ok(workbook) => load_team_table(&workbook, sheet_name),
        Err(e) => {
            log::warn!("Could not read workbook for team sheet '{}': {:#}", sheet_name, e);
            LoadedTeamTable::empty(TeamSheetStatus::Unreadable(e.to_string()))
        }
    }
}
