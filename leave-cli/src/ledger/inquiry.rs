//! Per-person statistics for one team table

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use super::{LeaveRecord, TeamTable};

/// Totals for one person
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberSummary {
    pub name: String,
    pub total_days: f64,
    /// Records carrying a day count
    pub record_count: usize,
}

/// One person's records, latest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberDetail {
    pub name: String,
    pub records: Vec<LeaveRecord>,
    pub total_days: f64,
    pub record_count: usize,
}

/// Ranked view of a team table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InquiryReport {
    pub sheet_name: String,
    pub had_data: bool,
    /// Sorted by total days descending, then name
    pub members: Vec<MemberSummary>,
    /// Distinct names, ascending
    pub member_names: Vec<String>,
    pub total_members: usize,
    pub total_records: usize,
    pub total_days: f64,
}

/// Group a team table by person.
/// Records without a name are left out.
pub fn build_report(sheet_name: &str, table: &TeamTable, had_data: bool) -> InquiryReport {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in table.iter().filter(|r| r.has_name()) {
        let entry = groups.entry(record.name.as_str()).or_insert((0.0, 0));
        if let Some(days) = record.days {
            entry.0 += days;
            entry.1 += 1;
        }
    }

    let member_names: Vec<String> = groups.keys().map(|name| name.to_string()).collect();

    let mut members: Vec<MemberSummary> = groups
        .into_iter()
        .map(|(name, (total_days, record_count))| MemberSummary {
            name: name.to_string(),
            total_days,
            record_count,
        })
        .collect();
    members.sort_by(|a, b| {
        b.total_days
            .partial_cmp(&a.total_days)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    let total_records = members.iter().map(|m| m.record_count).sum();
    let total_days = members.iter().map(|m| m.total_days).sum();

    InquiryReport {
        sheet_name: sheet_name.to_string(),
        had_data,
        total_members: members.len(),
        members,
        member_names,
        total_records,
        total_days,
    }
}

/// Records of one person sorted by start date descending.
/// Returns `None` when the name has no records.
pub fn member_detail(table: &TeamTable, name: &str) -> Option<MemberDetail> {
    let mut records: Vec<LeaveRecord> = table.iter().filter(|r| r.name == name).cloned().collect();
    if records.is_empty() {
        return None;
    }

    records.sort_by(|a, b| match (a.start_date, b.start_date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let total_days = records.iter().filter_map(|r| r.days).sum();
    let record_count = records.iter().filter(|r| r.days.is_some()).count();

    Some(MemberDetail {
        name: name.to_string(),
        records,
        total_days,
        record_count,
    })
}
