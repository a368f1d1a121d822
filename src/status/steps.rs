//! Step status resolution for a single task

use crate::core::{RunStatus, StepRef, StepState};
use crate::status::duration::calculate_duration_at;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What is known about a task's run when resolving its steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRunView {
    /// Classified task status; `None` when nothing ran
    pub reason: Option<RunStatus>,

    /// Live container state of the task's steps
    pub steps: Vec<StepState>,

    /// Task-level duration, if the task run has started
    pub duration: Option<String>,
}

/// Resolved status of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatus {
    pub name: String,
    pub status: RunStatus,
    pub duration: Option<String>,
}

/// Resolve a step's status against the wall clock
pub fn compute_step_status(step: &StepRef, task: Option<&TaskRunView>) -> StepStatus {
    compute_step_status_at(step, task, Utc::now())
}

/// Resolve a step's status; `now` closes the duration of running steps
pub fn compute_step_status_at(
    step: &StepRef,
    task: Option<&TaskRunView>,
    now: DateTime<Utc>,
) -> StepStatus {
    let resolved = |status, duration| StepStatus {
        name: step.name.clone(),
        status,
        duration,
    };

    let Some((task, reason)) = task.and_then(|t| t.reason.map(|r| (t, r))) else {
        return resolved(RunStatus::Cancelled, None);
    };

    let live = task.steps.iter().find(|s| s.matches(&step.name));

    match reason {
        RunStatus::InProgress | RunStatus::Running => match live {
            None => resolved(RunStatus::Pending, None),
            Some(state) => {
                if let Some(terminated) = &state.terminated {
                    let status = if terminated.reason.as_deref() == Some("Completed") {
                        RunStatus::Succeeded
                    } else {
                        RunStatus::Failed
                    };
                    resolved(status, terminated_duration(state, now))
                } else if let Some(running) = &state.running {
                    let duration = running
                        .started_at
                        .map(|start| calculate_duration_at(start, None, now));
                    resolved(RunStatus::InProgress, duration)
                } else {
                    resolved(RunStatus::Pending, None)
                }
            }
        },
        _ => {
            let duration = live
                .and_then(|state| terminated_duration(state, now))
                .or_else(|| task.duration.clone());
            resolved(reason, duration)
        }
    }
}

/// Duration of a terminated container, when both ends are recorded
fn terminated_duration(state: &StepState, now: DateTime<Utc>) -> Option<String> {
    let terminated = state.terminated.as_ref()?;
    let start = terminated.started_at?;
    let end = terminated.finished_at?;
    Some(calculate_duration_at(start, Some(end), now))
}
