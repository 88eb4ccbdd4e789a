//! Run outcome reported to the notification sink.

use std::time::Duration;

use crate::ledger::DailySnapshot;

/// Result of one ledger run.
///
/// Closed set: every sink must handle each case explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Rows were appended; carries the two latest ledger days for comparison.
    Success {
        rows_appended: usize,
        today: DailySnapshot,
        yesterday: DailySnapshot,
    },
    /// The ledger was already up to date.
    NoRowsToAppend,
    /// The run was aborted after exceeding its budget. Appends may be partial.
    TimedOut { budget: Duration },
    /// The run failed; `trace` is the rendered error chain.
    Failed { message: String, trace: String },
}

impl RunOutcome {
    /// Whether the process should report success to its scheduler.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::NoRowsToAppend)
    }

    /// Rows written by the run, zero for every non-success case.
    pub fn rows_appended(&self) -> usize {
        match self {
            Self::Success { rows_appended, .. } => *rows_appended,
            _ => 0,
        }
    }

    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::NoRowsToAppend => "no_rows_to_append",
            Self::TimedOut { .. } => "timed_out",
            Self::Failed { .. } => "failed",
        }
    }
}
