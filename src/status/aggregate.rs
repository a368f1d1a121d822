//! Task-run roll-up: how many tasks of a run are in each state

use crate::core::{
    classify, classify_or_pending, PipelineDefinition, PipelineRun, RunSpecStatus, RunStatus,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Histogram of task outcomes for one pipeline run.
///
/// Once the run has started the counters add up to the pipeline's task
/// count. When no run data exists only `not_started` is set, to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusHistogram {
    pub not_started: usize,
    pub pending: usize,
    pub running: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub skipped: usize,
}

/// Buckets in the order status bars draw them
pub const BUCKET_ORDER: [RunStatus; 7] = [
    RunStatus::Succeeded,
    RunStatus::Running,
    RunStatus::Failed,
    RunStatus::Cancelled,
    RunStatus::Skipped,
    RunStatus::Pending,
    RunStatus::PipelineNotStarted,
];

impl TaskStatusHistogram {
    /// The "no run data available" sentinel
    pub fn not_started() -> Self {
        Self {
            not_started: 1,
            ..Default::default()
        }
    }

    /// Whether this is the sentinel rather than a per-task count
    pub fn is_not_started(&self) -> bool {
        self.not_started > 0
    }

    /// Sum of all counters
    pub fn total(&self) -> usize {
        self.not_started
            + self.pending
            + self.running
            + self.succeeded
            + self.failed
            + self.cancelled
            + self.skipped
    }

    /// Counter a task with this status lands in
    fn bucket_mut(&mut self, status: RunStatus) -> &mut usize {
        match status {
            RunStatus::Succeeded => &mut self.succeeded,
            RunStatus::Running | RunStatus::InProgress => &mut self.running,
            RunStatus::Failed | RunStatus::FailedToStart => &mut self.failed,
            RunStatus::Cancelled => &mut self.cancelled,
            RunStatus::Skipped => &mut self.skipped,
            RunStatus::PipelineNotStarted => &mut self.not_started,
            RunStatus::Pending | RunStatus::Cancelling | RunStatus::Idle => &mut self.pending,
        }
    }

    /// Count for the bucket `status` maps to
    pub fn count(&self, status: RunStatus) -> usize {
        let mut copy = *self;
        *copy.bucket_mut(status)
    }

    /// Non-empty buckets, in [`BUCKET_ORDER`]
    pub fn iter(&self) -> impl Iterator<Item = (RunStatus, usize)> + '_ {
        BUCKET_ORDER
            .iter()
            .map(move |s| (*s, self.count(*s)))
            .filter(|(_, n)| *n > 0)
    }

    /// Share of tasks in the bucket, 0.0 to 1.0
    pub fn fraction(&self, status: RunStatus) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(status) as f64 / total as f64
    }
}

/// Classify a task run for counting: anything not succeeded, running,
/// failed or cancelled is pending.
fn task_run_bucket(status: RunStatus) -> RunStatus {
    match status {
        RunStatus::Succeeded
        | RunStatus::Running
        | RunStatus::Failed
        | RunStatus::Cancelled => status,
        _ => RunStatus::Pending,
    }
}

/// Roll a run's task runs up into a [`TaskStatusHistogram`].
///
/// Either input may be missing. Tasks the run has not reached yet are
/// counted as cancelled when a task failed or the run was cancelled, and
/// as pending otherwise.
pub fn compute_task_status(
    run: Option<&PipelineRun>,
    pipeline: Option<&PipelineDefinition>,
) -> TaskStatusHistogram {
    let total = pipeline.map_or(0, PipelineDefinition::total_task_count);
    let mut histogram = TaskStatusHistogram::default();

    let Some(run) = run else {
        return TaskStatusHistogram::not_started();
    };

    match run.task_runs().filter(|trs| !trs.is_empty()) {
        Some(task_runs) => {
            for (key, task_run) in task_runs {
                let status = task_run_bucket(classify_or_pending(task_run.conditions(), None));
                debug!(
                    task_run = %key,
                    task = %task_run.pipeline_task_name,
                    %status,
                    "classified task run"
                );
                *histogram.bucket_mut(status) += 1;
            }

            histogram.skipped = run.skipped_tasks().len();

            let observed = task_runs.len();
            let unhandled = if total >= observed {
                total.saturating_sub(observed + histogram.skipped)
            } else {
                warn!(
                    run = run.name(),
                    observed,
                    declared = total,
                    "more task runs than declared tasks"
                );
                total
            };

            let run_status = classify(run.conditions(), run.spec_status());
            if histogram.failed > 0 || run_status == Some(RunStatus::Cancelled) {
                histogram.cancelled += unhandled;
            } else {
                histogram.pending += unhandled;
            }
        }
        None => {
            let first_failed = run.conditions().first().is_some_and(|c| c.status == "False");
            match run.spec_status() {
                _ if first_failed => histogram.cancelled = total,
                Some(RunSpecStatus::PipelineRunCancelled) => histogram.cancelled = total,
                Some(RunSpecStatus::PipelineRunPending) => histogram.pending += total,
                _ => histogram.not_started = 1,
            }
        }
    }

    histogram
}

/// Overall status of a run, `PipelineNotStarted` when nothing is known
pub fn pipeline_run_status(run: Option<&PipelineRun>) -> RunStatus {
    run.and_then(|r| classify(r.conditions(), r.spec_status()))
        .unwrap_or(RunStatus::PipelineNotStarted)
}
