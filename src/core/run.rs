//! PipelineRun model (the live half of the input)

use crate::core::pipeline::PipelineDefinition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Object metadata (only the parts we display)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: Option<String>,
}

/// One execution of a pipeline, as returned by the cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: PipelineRunSpec,

    /// Live status; absent until the controller first reconciles the run
    #[serde(default)]
    pub status: Option<PipelineRunStatus>,
}

/// Caller-controlled part of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRunSpec {
    /// Raw directive (e.g. `PipelineRunCancelled`); see [`PipelineRun::spec_status`]
    #[serde(default)]
    pub status: Option<String>,
}

/// Directive a user can set on `spec.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunSpecStatus {
    PipelineRunCancelled,
    PipelineRunPending,
    PipelineRunStopped,
    StoppedRunFinally,
    CancelledRunFinally,
}

impl RunSpecStatus {
    /// Whether the directive asks Tekton to stop the run
    pub fn is_stop_request(&self) -> bool {
        !matches!(self, RunSpecStatus::PipelineRunPending)
    }
}

impl FromStr for RunSpecStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PipelineRunCancelled" => Ok(RunSpecStatus::PipelineRunCancelled),
            "PipelineRunPending" => Ok(RunSpecStatus::PipelineRunPending),
            "PipelineRunStopped" => Ok(RunSpecStatus::PipelineRunStopped),
            "StoppedRunFinally" => Ok(RunSpecStatus::StoppedRunFinally),
            "CancelledRunFinally" => Ok(RunSpecStatus::CancelledRunFinally),
            other => Err(format!("Unknown pipeline run spec status: {}", other)),
        }
    }
}

/// Kubernetes-style status condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,

    /// `True`, `False` or `Unknown`
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Live status of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRunStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Task runs keyed by their generated name (not the pipeline task name)
    #[serde(default)]
    pub task_runs: Option<BTreeMap<String, PipelineTaskRun>>,

    /// Tasks whose `when` expressions were not met
    #[serde(default)]
    pub skipped_tasks: Vec<SkippedTask>,

    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub completion_time: Option<DateTime<Utc>>,

    /// Resolved pipeline definition the controller recorded for this run
    #[serde(default)]
    pub pipeline_spec: Option<PipelineDefinition>,
}

/// Entry of `status.taskRuns`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTaskRun {
    pub pipeline_task_name: String,

    #[serde(default)]
    pub status: Option<TaskRunStatus>,
}

/// Live status of a single task run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRunStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub completion_time: Option<DateTime<Utc>>,

    /// Container state of each step, in execution order
    #[serde(default)]
    pub steps: Vec<StepState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTask {
    pub name: String,
}

/// Container state of a step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepState {
    pub name: String,

    /// Container name, usually `step-<name>`
    #[serde(default)]
    pub container: Option<String>,

    #[serde(default)]
    pub terminated: Option<TerminatedState>,

    #[serde(default)]
    pub running: Option<RunningState>,

    #[serde(default)]
    pub waiting: Option<WaitingState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminatedState {
    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningState {
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitingState {
    #[serde(default)]
    pub reason: Option<String>,
}

impl PipelineRun {
    /// Parsed `spec.status` directive; unknown values are ignored
    pub fn spec_status(&self) -> Option<RunSpecStatus> {
        self.spec.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Run conditions, empty when the run has no status yet
    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|s| s.conditions.as_slice())
            .unwrap_or_default()
    }

    /// Task runs map, if the controller has created any
    pub fn task_runs(&self) -> Option<&BTreeMap<String, PipelineTaskRun>> {
        self.status.as_ref().and_then(|s| s.task_runs.as_ref())
    }

    /// Names of skipped pipeline tasks
    pub fn skipped_tasks(&self) -> &[SkippedTask] {
        self.status
            .as_ref()
            .map(|s| s.skipped_tasks.as_slice())
            .unwrap_or_default()
    }

    /// Whether the named pipeline task was skipped
    pub fn is_skipped(&self, task_name: &str) -> bool {
        self.skipped_tasks().iter().any(|t| t.name == task_name)
    }

    /// Find the task run created for a pipeline task
    pub fn task_run_for(&self, task_name: &str) -> Option<&PipelineTaskRun> {
        self.task_runs()?
            .values()
            .find(|tr| tr.pipeline_task_name == task_name)
    }

    /// Pipeline definition embedded in the run status
    pub fn embedded_pipeline(&self) -> Option<&PipelineDefinition> {
        self.status.as_ref().and_then(|s| s.pipeline_spec.as_ref())
    }

    /// Display name of the run
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("<unnamed>")
    }
}

impl PipelineTaskRun {
    /// Task run conditions, empty when not yet reconciled
    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|s| s.conditions.as_slice())
            .unwrap_or_default()
    }
}

impl StepState {
    /// Whether this live step corresponds to the declared step `name`.
    ///
    /// Tekton prefixes container names with `step-`; either side may
    /// carry the prefix.
    pub fn matches(&self, name: &str) -> bool {
        let bare = |s: &str| s.strip_prefix("step-").unwrap_or(s).to_string();
        let wanted = bare(name);
        bare(&self.name) == wanted
            || self.container.as_deref().is_some_and(|c| bare(c) == wanted)
    }
}
