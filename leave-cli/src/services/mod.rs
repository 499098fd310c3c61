// Orchestration services
//
// Each service loads the workbooks it needs, runs the pure transforms from
// `crate::ledger` and hands back a structured outcome. Writing files is left
// to the caller except for `persist::write_artifact`.

pub mod inquiry;
pub mod persist;
pub mod summary;
pub mod update;

pub use inquiry::{InquiryOutcome, run_inquiry};
pub use persist::write_artifact;
pub use summary::run_summary;
pub use update::{UpdateOutcome, run_update};
