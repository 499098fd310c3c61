//! Merge new records into a team table

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::{LeaveRecord, SupersessionKey, TeamTable};

/// Merge `new` into `existing` and return the sorted result.
///
/// Existing records sharing (name, start_date) with any new record are
/// dropped first, so a corrected entry replaces the old one.
pub fn merge_and_sort(existing: &TeamTable, new: &[LeaveRecord]) -> TeamTable {
    warn_duplicate_keys(new);

    let mut records: Vec<LeaveRecord> = if new.is_empty() {
        existing.records.clone()
    } else {
        let superseded: HashSet<SupersessionKey> =
            new.iter().map(LeaveRecord::supersession_key).collect();

        let kept = existing
            .iter()
            .filter(|record| !superseded.contains(&record.supersession_key()));
        let before = existing.len();
        let mut merged: Vec<LeaveRecord> = kept.cloned().collect();
        let dropped = before - merged.len();
        if dropped > 0 {
            log::info!("{} existing record(s) superseded", dropped);
        }
        merged.extend(new.iter().cloned());
        merged
    };

    sort_records(&mut records);
    TeamTable::new(records)
}

/// Sort by name ascending, then start date descending.
/// Empty names and missing dates go last. The sort is stable.
pub fn sort_records(records: &mut [LeaveRecord]) {
    records.sort_by(|a, b| {
        compare_names(&a.name, &b.name).then_with(|| match (a.start_date, b.start_date) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
    });
}

fn compare_names(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (false, false) => a.cmp(b),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}

fn warn_duplicate_keys(new: &[LeaveRecord]) {
    let mut counts: HashMap<SupersessionKey, usize> = HashMap::new();
    for record in new {
        *counts.entry(record.supersession_key()).or_default() += 1;
    }

    let mut duplicated: Vec<&SupersessionKey> = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(key, _)| key)
        .collect();
    duplicated.sort();

    for key in duplicated {
        log::warn!(
            "Addition holds {} records for '{}' starting {}; all are kept",
            counts[key],
            key.name,
            key.start_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "(no date)".to_string())
        );
    }
}
