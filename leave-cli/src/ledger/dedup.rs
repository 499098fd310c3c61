//! Filter out records the team table already holds

use std::collections::HashSet;

use super::{LeaveRecord, RecordIdentity, TeamTable};

/// Candidates with no exact (name, start_date, end_date, days) match in
/// `existing`, in their original order.
pub fn find_new_records(candidates: &[LeaveRecord], existing: &TeamTable) -> Vec<LeaveRecord> {
    if existing.is_empty() {
        return candidates.to_vec();
    }

    let known: HashSet<RecordIdentity> = existing.iter().map(LeaveRecord::identity).collect();

    candidates
        .iter()
        .filter(|record| !known.contains(&record.identity()))
        .cloned()
        .collect()
}
