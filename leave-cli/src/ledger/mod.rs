//! Leave record reconciliation and aggregation
//!
//! Everything in here is a pure function over in-memory tables. Reading and
//! writing workbooks happens in `crate::workbook`, orchestration in
//! `crate::services`.

pub mod types;
pub mod cells;
pub mod error;
pub mod normalize;
pub mod team;
pub mod dedup;
pub mod merge;
pub mod summary;
pub mod inquiry;

pub use types::*;
pub use error::LedgerError;
pub use normalize::normalize_sheet;
pub use team::{TeamSheetStatus, load_team_table, load_team_table_from_bytes};
pub use dedup::find_new_records;
pub use merge::merge_and_sort;
pub use summary::{SummaryStatus, build_yearly_summary, render_summary_sheet};
pub use inquiry::{InquiryReport, MemberDetail, build_report, member_detail};
