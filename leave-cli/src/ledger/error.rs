//! Errors surfaced to the caller

/// Failures that abort an operation.
///
/// A missing team sheet and an empty summary scan are not errors; see
/// `TeamSheetStatus` and `SummaryStatus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The addition sheet has fewer than four columns
    MalformedInput { sheet: String, columns: usize },
    /// The addition file could not be read or has no sheets
    UnreadableSource { reason: String },
    /// Writing or verifying the master workbook failed
    Persistence { sheet: String, reason: String },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::MalformedInput { sheet, columns } => write!(
                f,
                "sheet '{}' has {} column(s); at least 4 are required (name, start date, end date, days)",
                sheet, columns
            ),
            LedgerError::UnreadableSource { reason } => {
                write!(f, "addition file could not be read: {}", reason)
            }
            LedgerError::Persistence { sheet, reason } => {
                write!(f, "failed to save sheet '{}': {}", sheet, reason)
            }
        }
    }
}

impl std::error::Error for LedgerError {}
