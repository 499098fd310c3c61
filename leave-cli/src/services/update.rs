//! Update: fold an addition file into the master workbook

use serde::Serialize;

use super::persist::MasterWorkbook;
use crate::config::LedgerConfig;
use crate::ledger::{
    LeaveRecord, LedgerError, RawTable, SummaryStatus, TeamSheetStatus, TeamTable,
    find_new_records, load_team_table, merge_and_sort, normalize_sheet,
};
use crate::workbook::read_workbook;

/// Everything an update produced
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOutcome {
    /// Team sheet that was updated; the addition's first sheet name
    pub sheet_name: String,
    /// The addition as uploaded, for preview
    #[serde(skip)]
    pub raw_source: RawTable,
    pub new_records: Vec<LeaveRecord>,
    pub updated: TeamTable,
    #[serde(skip)]
    pub team_status: TeamSheetStatus,
    pub summary: SummaryStatus,
    /// Serialized master workbook
    #[serde(skip)]
    pub artifact: Vec<u8>,
}

impl UpdateOutcome {
    pub fn new_record_count(&self) -> usize {
        self.new_records.len()
    }

    /// Whether the team sheet held records before the update
    pub fn had_data(&self) -> bool {
        self.team_status == TeamSheetStatus::Loaded
    }
}

/// Run the update pipeline on workbook bytes.
///
/// Load both workbooks, normalize the addition, drop records already on
/// file, merge, rebuild the summary and serialize once. Only the team sheet
/// and the summary sheet are rebuilt; the rest of the master is saved as it
/// was read. Nothing is written to disk here.
pub fn run_update(
    master: &[u8],
    addition: &[u8],
    config: &LedgerConfig,
) -> Result<UpdateOutcome, LedgerError> {
    let addition = read_workbook(addition).map_err(|e| LedgerError::UnreadableSource {
        reason: format!("{:#}", e),
    })?;
    let source = addition.sheets.first().ok_or_else(|| LedgerError::UnreadableSource {
        reason: "workbook has no sheets".to_string(),
    })?;
    if let Some(reason) = &source.read_error {
        return Err(LedgerError::UnreadableSource {
            reason: format!("sheet '{}': {}", source.name, reason),
        });
    }

    let normalized = normalize_sheet(source)?;
    let sheet_name = normalized.sheet_name.clone();
    log::info!(
        "Addition sheet '{}' holds {} record(s)",
        sheet_name,
        normalized.records.len()
    );

    let mut workbook = MasterWorkbook::open(master, &sheet_name, &config.layout)?;

    let loaded = load_team_table(&workbook.values, &sheet_name);
    let new_records = find_new_records(&normalized.records, &loaded.table);
    log::info!("{} new record(s) for '{}'", new_records.len(), sheet_name);

    let updated = merge_and_sort(&loaded.table, &new_records);
    workbook.replace_team_sheet(&sheet_name, &updated, &config.layout.width_bounds())?;

    let summary = workbook.rebuild_summary(config)?;
    let artifact = workbook.save_verified(&sheet_name)?;

    Ok(UpdateOutcome {
        sheet_name,
        raw_source: normalized.raw,
        new_records,
        updated,
        team_status: loaded.status,
        summary,
        artifact,
    })
}
