//! Run status model and condition classification

use crate::core::run::{Condition, RunSpecStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a pipeline run or one of its task runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    Succeeded,
    Failed,
    Running,
    #[serde(rename = "In Progress")]
    InProgress,
    FailedToStart,
    PipelineNotStarted,
    Skipped,
    Cancelled,
    Cancelling,
    Pending,
    Idle,
}

impl RunStatus {
    /// Label used by Tekton and the console for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Succeeded => "Succeeded",
            RunStatus::Failed => "Failed",
            RunStatus::Running => "Running",
            RunStatus::InProgress => "In Progress",
            RunStatus::FailedToStart => "FailedToStart",
            RunStatus::PipelineNotStarted => "PipelineNotStarted",
            RunStatus::Skipped => "Skipped",
            RunStatus::Cancelled => "Cancelled",
            RunStatus::Cancelling => "Cancelling",
            RunStatus::Pending => "Pending",
            RunStatus::Idle => "Idle",
        }
    }

    /// Whether the status is final
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Succeeded
                | RunStatus::Failed
                | RunStatus::FailedToStart
                | RunStatus::Skipped
                | RunStatus::Cancelled
        )
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition type Tekton uses for the overall outcome
pub const SUCCEEDED_CONDITION: &str = "Succeeded";

/// Reasons that turn a `False` succeeded condition into a cancellation
const CANCELLED_REASONS: &[&str] = &[
    "PipelineRunStopped",
    "PipelineRunCancelled",
    "TaskRunCancelled",
    "Cancelled",
    "StoppedRunFinally",
    "CancelledRunFinally",
];

/// Classify a set of conditions into a run status.
///
/// `spec_status` is the directive the caller placed on the run (if any);
/// task runs pass `None`. Returns `None` when the conditions carry no
/// usable outcome yet.
pub fn classify(
    conditions: &[Condition],
    spec_status: Option<RunSpecStatus>,
) -> Option<RunStatus> {
    if conditions.is_empty() {
        return None;
    }

    let succeeded = conditions.iter().find(|c| c.condition_type == SUCCEEDED_CONDITION);
    let cancelled = conditions.iter().any(|c| c.reason.as_deref() == Some("Cancelled"));
    let failed = conditions.iter().any(|c| c.reason.as_deref() == Some("Failed"));

    // A stop directive only matters until the run has finished
    let finished = succeeded.is_some_and(|c| c.status == "True" || c.status == "False");
    if spec_status.is_some_and(|s| s.is_stop_request()) && !cancelled && !finished {
        return Some(RunStatus::Cancelling);
    }

    let succeeded = succeeded.filter(|c| !c.status.is_empty())?;

    let status = match succeeded.status.as_str() {
        "True" => RunStatus::Succeeded,
        "False" => RunStatus::Failed,
        _ => RunStatus::Running,
    };

    if failed {
        return Some(RunStatus::Failed);
    }

    let reason = succeeded.reason.as_deref().unwrap_or_default();
    if status == RunStatus::Failed && CANCELLED_REASONS.contains(&reason) {
        return Some(RunStatus::Cancelled);
    }
    if status == RunStatus::Running && reason == "PipelineRunPending" {
        return Some(RunStatus::Pending);
    }

    Some(status)
}

/// Classify, treating "no outcome yet" as pending
pub fn classify_or_pending(
    conditions: &[Condition],
    spec_status: Option<RunSpecStatus>,
) -> RunStatus {
    classify(conditions, spec_status).unwrap_or(RunStatus::Pending)
}
