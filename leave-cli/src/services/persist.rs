//! Persisting the master workbook

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{LayoutConfig, LedgerConfig};
use crate::ledger::{
    LedgerError, SummaryStatus, TeamTable, build_yearly_summary, render_summary_sheet,
};
use crate::workbook::{
    MasterDocument, WidthBounds, Workbook, list_sheets, read_workbook, reflow_column_widths,
};

/// The master workbook, held twice: as plain values for the ledger
/// transforms and as an editable document that is saved. Every sheet change
/// goes to both so later steps (the summary) see it.
pub struct MasterWorkbook {
    pub values: Workbook,
    document: MasterDocument,
}

impl MasterWorkbook {
    /// Open the master. Failure here means nothing can be saved, so it is a
    /// `Persistence` error naming `sheet_name`.
    pub fn open(
        bytes: &[u8],
        sheet_name: &str,
        layout: &LayoutConfig,
    ) -> Result<Self, LedgerError> {
        let unopenable = |e: anyhow::Error| LedgerError::Persistence {
            sheet: sheet_name.to_string(),
            reason: format!("master workbook could not be opened: {:#}", e),
        };

        let values = read_workbook(bytes).map_err(unopenable)?;
        let document = MasterDocument::open(bytes, &layout.date_format).map_err(unopenable)?;
        Ok(Self { values, document })
    }

    /// Put `table` under `sheet_name`, replacing a sheet of that name in
    /// place or appending a new one. Column widths are recomputed for that
    /// sheet only. Returns the sheet's index.
    pub fn replace_team_sheet(
        &mut self,
        sheet_name: &str,
        table: &TeamTable,
        bounds: &WidthBounds,
    ) -> Result<usize, LedgerError> {
        let mut sheet = table.to_sheet(sheet_name);
        reflow_column_widths(&mut sheet, bounds);

        let index = self
            .document
            .replace_or_append(&sheet)
            .map_err(|e| persistence(sheet_name, e))?;
        self.values.replace_or_append(sheet);

        log::debug!("Team sheet '{}' written at index {}", sheet_name, index);
        Ok(index)
    }

    /// Rebuild the yearly summary and put it first. When no sheet has usable
    /// data the existing summary sheet is not touched at all.
    pub fn rebuild_summary(
        &mut self,
        config: &LedgerConfig,
    ) -> Result<SummaryStatus, LedgerError> {
        let Some(summary) = build_yearly_summary(&self.values, &config.summary) else {
            log::info!("Yearly summary skipped, '{}' left as is", config.summary.sheet_name);
            return Ok(SummaryStatus::Skipped);
        };

        let rows = summary.rows.len();
        let sheet = render_summary_sheet(&summary, config);
        self.document
            .insert_replacing(0, &sheet)
            .map_err(|e| persistence(&config.summary.sheet_name, e))?;
        self.values.insert_replacing(0, sheet);

        log::info!("Yearly summary rebuilt with {} row(s)", rows);
        Ok(SummaryStatus::Built { rows })
    }

    /// Serialize, then read the bytes back and make sure `sheet_name` made it
    pub fn save_verified(&self, sheet_name: &str) -> Result<Vec<u8>, LedgerError> {
        let bytes = self.document.save().map_err(|e| persistence(sheet_name, e))?;

        let names = list_sheets(&bytes).map_err(|e| persistence(sheet_name, e))?;
        if !names.iter().any(|name| name == sheet_name) {
            return Err(LedgerError::Persistence {
                sheet: sheet_name.to_string(),
                reason: "sheet not found after write".to_string(),
            });
        }

        Ok(bytes)
    }
}

fn persistence(sheet_name: &str, e: anyhow::Error) -> LedgerError {
    LedgerError::Persistence {
        sheet: sheet_name.to_string(),
        reason: format!("{:#}", e),
    }
}

/// Write `bytes` to `path` through a temporary sibling file and a rename,
/// so the target is never left half written.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp = temp_sibling(path);

    std::fs::write(&temp, bytes)
        .with_context(|| format!("Failed to write temporary file: {}", temp.display()))?;

    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(e).with_context(|| format!("Failed to replace workbook: {}", path.display()));
    }

    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook.xlsx".to_string());
    path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LeaveRecord;
    use crate::workbook::{Cell, Sheet, write_workbook};
    use chrono::NaiveDate;

    fn table() -> TeamTable {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        TeamTable::new(vec![LeaveRecord::new(
            "A very long team member name that goes on",
            date,
            date,
            1.0,
        )])
    }

    fn open(sheets: Vec<Sheet>) -> MasterWorkbook {
        let bytes = write_workbook(&Workbook { sheets }, "yyyy-mm-dd").unwrap();
        MasterWorkbook::open(&bytes, "Team A", &LayoutConfig::default()).unwrap()
    }

    #[test]
    fn test_replace_keeps_other_sheets_in_place() {
        let mut master = open(vec![
            Sheet::with_rows("Summary", vec![vec![Cell::text("title")]]),
            Sheet::with_rows("Team A", vec![vec![Cell::text("old")]]),
            Sheet::with_rows("Team B", vec![vec![Cell::text("keep")]]),
        ]);

        let index = master
            .replace_team_sheet("Team A", &table(), &WidthBounds::default())
            .unwrap();

        assert_eq!(index, 1);
        assert_eq!(master.values.sheets[1].cell(0, 0), &Cell::text("name"));
        let widths = &master.values.sheets[1].layout.column_widths;
        assert_eq!(widths[&0], 43.0);
        assert_eq!(widths[&1], 15.0);

        let back = read_workbook(&master.save_verified("Team A").unwrap()).unwrap();
        assert_eq!(back.sheet_names(), vec!["Summary", "Team A", "Team B"]);
        assert_eq!(back.sheets[2].cell(0, 0), &Cell::text("keep"));
        assert_eq!(
            back.sheets[1].cell(1, 1),
            &Cell::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn test_new_sheet_is_appended() {
        let mut master = open(vec![Sheet::new("Summary")]);

        let index = master
            .replace_team_sheet("Team C", &table(), &WidthBounds::default())
            .unwrap();
        assert_eq!(index, 1);
        assert_eq!(master.values.sheet_names(), vec!["Summary", "Team C"]);
    }

    #[test]
    fn test_summary_rebuilt_at_front_replacing_old_one() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let team = TeamTable::new(vec![LeaveRecord::new("Alice", date, date, 1.0)]);
        let mut master = open(vec![
            Sheet::new("Cover"),
            team.to_sheet("Team A"),
            Sheet::with_rows("재현이네", vec![vec![Cell::text("old")]]),
        ]);

        let status = master.rebuild_summary(&LedgerConfig::default()).unwrap();
        assert_eq!(status, SummaryStatus::Built { rows: 1 });
        assert_eq!(master.values.sheet_names(), vec!["재현이네", "Cover", "Team A"]);

        let back = read_workbook(&master.save_verified("재현이네").unwrap()).unwrap();
        assert_eq!(back.sheet_names(), vec!["재현이네", "Cover", "Team A"]);
        assert_eq!(back.sheets[0].cell(2, 1), &Cell::text("Alice"));
    }

    #[test]
    fn test_missing_sheet_after_write_is_persistence_error() {
        let master = open(vec![Sheet::new("Other")]);

        let err = master.save_verified("Team A").unwrap_err();
        assert!(matches!(err, LedgerError::Persistence { .. }));
    }

    #[test]
    fn test_unopenable_master_is_persistence_error() {
        let err = MasterWorkbook::open(b"junk", "Team A", &LayoutConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, LedgerError::Persistence { ref sheet, .. } if sheet == "Team A"));
    }

    #[test]
    fn test_write_artifact_replaces_file() {
        let dir = std::env::temp_dir().join(format!("leave-cli-persist-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("master.xlsx");
        std::fs::write(&path, b"old").unwrap();

        write_artifact(&path, b"new").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
