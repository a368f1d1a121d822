//! Per-task resolution: pairs each declared task with its task run

use crate::core::{
    classify, classify_or_pending, PipelineDefinition, PipelineRun, PipelineTask, RunStatus,
    StepRef, TaskKind,
};
use crate::status::{
    duration::calculate_duration_at,
    steps::{compute_step_status_at, StepStatus, TaskRunView},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A declared task with what the run knows about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTask {
    pub name: String,
    pub kind: TaskKind,

    /// Generated name of the task run, if one exists
    pub task_run: Option<String>,

    #[serde(flatten)]
    pub view: TaskRunView,
}

impl ResolvedTask {
    /// Status to display; tasks of a run without status have not started
    pub fn status(&self) -> RunStatus {
        self.view.reason.unwrap_or(RunStatus::PipelineNotStarted)
    }
}

/// Resolve every task of `pipeline` (main, then finally) against `run`
pub fn resolve_task_statuses(
    pipeline: &PipelineDefinition,
    run: &PipelineRun,
    now: DateTime<Utc>,
) -> Vec<ResolvedTask> {
    let run_status = classify(run.conditions(), run.spec_status());
    let run_stopped = matches!(run_status, Some(RunStatus::Cancelled | RunStatus::Failed));

    pipeline
        .all_tasks()
        .map(|(kind, task)| {
            let mut resolved = ResolvedTask {
                name: task.name.clone(),
                kind,
                task_run: None,
                view: TaskRunView::default(),
            };

            if run.status.is_none() {
                return resolved;
            }

            resolved.view.reason = Some(RunStatus::Pending);

            let task_run = run
                .task_runs()
                .and_then(|trs| trs.iter().find(|(_, tr)| tr.pipeline_task_name == task.name));

            if let Some((key, task_run)) = task_run {
                resolved.task_run = Some(key.clone());
                resolved.view.reason = Some(classify_or_pending(task_run.conditions(), None));
                if let Some(status) = &task_run.status {
                    resolved.view.steps = status.steps.clone();
                    resolved.view.duration = status
                        .start_time
                        .map(|start| calculate_duration_at(start, status.completion_time, now));
                }
            } else if run.is_skipped(&task.name) {
                resolved.view.reason = Some(RunStatus::Skipped);
            } else if run_stopped {
                resolved.view.reason = Some(RunStatus::Cancelled);
            }

            debug!(task = %task.name, status = %resolved.status(), "resolved task");
            resolved
        })
        .collect()
}

/// Steps to show for a task: the declared ones, else the live ones
fn step_refs(task: &PipelineTask, view: &TaskRunView) -> Vec<StepRef> {
    if !task.steps().is_empty() {
        return task.steps().to_vec();
    }
    view.steps
        .iter()
        .map(|s| StepRef {
            name: s.name.clone(),
        })
        .collect()
}

/// Resolve the steps of one resolved task
pub fn resolve_steps(
    task: &PipelineTask,
    resolved: &ResolvedTask,
    now: DateTime<Utc>,
) -> Vec<StepStatus> {
    step_refs(task, &resolved.view)
        .iter()
        .map(|step| compute_step_status_at(step, Some(&resolved.view), now))
        .collect()
}
