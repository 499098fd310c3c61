//! Inquiry: read-only report on one team sheet

use anyhow::{Result, bail};
use serde::Serialize;

use crate::ledger::{
    InquiryReport, MemberDetail, build_report, load_team_table_from_bytes, member_detail,
};
use crate::workbook::list_sheets;

#[derive(Debug, Clone, Serialize)]
pub struct InquiryOutcome {
    pub report: InquiryReport,
    /// Present when a member was asked for and found
    pub detail: Option<MemberDetail>,
}

/// Sheet used when none is named: the first team sheet (index 1), or the
/// only sheet of a single-sheet workbook.
pub fn default_inquiry_sheet(sheet_names: &[String]) -> Option<&str> {
    sheet_names.get(1).or_else(|| sheet_names.first()).map(String::as_str)
}

/// Report on one team sheet of the master workbook.
///
/// A missing or unusable sheet yields an empty report. Only a workbook that
/// cannot be opened at all while picking the default sheet is an error.
pub fn run_inquiry(
    master: &[u8],
    sheet: Option<&str>,
    member: Option<&str>,
) -> Result<InquiryOutcome> {
    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => {
            let names = list_sheets(master)?;
            match default_inquiry_sheet(&names) {
                Some(name) => name.to_string(),
                None => bail!("Workbook has no sheets"),
            }
        }
    };

    let loaded = load_team_table_from_bytes(master, &sheet_name);
    let report = build_report(&sheet_name, &loaded.table, loaded.had_data());

    let detail = match member {
        Some(name) => {
            let detail = member_detail(&loaded.table, name);
            if detail.is_none() {
                log::warn!("No records for '{}' in sheet '{}'", name, sheet_name);
            }
            detail
        }
        None => None,
    };

    Ok(InquiryOutcome { report, detail })
}
