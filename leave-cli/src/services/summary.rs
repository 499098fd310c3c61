//! Rebuild the yearly summary without touching any team sheet

use serde::Serialize;

use super::persist::MasterWorkbook;
use crate::config::LedgerConfig;
use crate::ledger::{LedgerError, SummaryStatus};

#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutcome {
    pub status: SummaryStatus,
    /// Serialized workbook, only when the summary was rebuilt
    #[serde(skip)]
    pub artifact: Option<Vec<u8>>,
}

pub fn run_summary(master: &[u8], config: &LedgerConfig) -> Result<SummaryOutcome, LedgerError> {
    let sheet_name = &config.summary.sheet_name;
    let mut workbook = MasterWorkbook::open(master, sheet_name, &config.layout)?;

    let status = workbook.rebuild_summary(config)?;
    let artifact = match status {
        SummaryStatus::Built { .. } => Some(workbook.save_verified(sheet_name)?),
        SummaryStatus::Skipped => None,
    };

    Ok(SummaryOutcome { status, artifact })
}
