//! Pipeline run summary types

use crate::aggregate::AggregateReport;
use crate::classify::ClassifyReport;
use crate::clean::CleanReport;
use crate::output::WriteReport;
use serde::Serialize;

/// Final state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Dataset written and marked with `_SUCCESS`
    Succeeded,
    /// Transformation finished but the write failed
    Failed,
}

/// Everything a run reports once it ends without a fatal error
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub pipeline: String,
    pub run_id: String,
    pub status: RunStatus,
    /// Configured output location
    pub output: String,
    pub clean: CleanReport,
    pub classify: ClassifyReport,
    pub aggregate: AggregateReport,
    /// Present when the write succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write: Option<WriteReport>,
    /// Write failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Succeeded
    }
}
