//! Pipeline definition model

use serde::{Deserialize, Serialize};

/// A pipeline definition: ordered tasks plus `finally` tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineDefinition {
    /// Main tasks, in declaration order
    #[serde(default)]
    pub tasks: Vec<PipelineTask>,

    /// Tasks that run after the main tasks regardless of their outcome
    #[serde(default, rename = "finally")]
    pub finally_tasks: Vec<PipelineTask>,
}

/// A task entry in a pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTask {
    /// Name, unique within the pipeline
    pub name: String,

    /// Referenced task (by name) when the spec is not embedded
    #[serde(default)]
    pub task_ref: Option<TaskRef>,

    /// Embedded task spec
    #[serde(default)]
    pub task_spec: Option<TaskSpec>,

    /// Tasks this one must run after
    #[serde(default)]
    pub run_after: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    #[serde(default)]
    pub steps: Vec<StepRef>,
}

/// A declared step of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRef {
    pub name: String,
}

/// Whether a task belongs to the main sequence or the finally block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Main,
    Finally,
}

impl PipelineDefinition {
    /// Number of tasks a run of this pipeline accounts for
    pub fn total_task_count(&self) -> usize {
        self.tasks.len() + self.finally_tasks.len()
    }

    /// All tasks, main first, tagged with their kind
    pub fn all_tasks(&self) -> impl Iterator<Item = (TaskKind, &PipelineTask)> {
        self.tasks
            .iter()
            .map(|t| (TaskKind::Main, t))
            .chain(self.finally_tasks.iter().map(|t| (TaskKind::Finally, t)))
    }

    /// Get a task (main or finally) by name
    pub fn task(&self, name: &str) -> Option<&PipelineTask> {
        self.all_tasks().map(|(_, t)| t).find(|t| t.name == name)
    }
}

impl PipelineTask {
    /// Declared steps, empty when the task is only referenced
    pub fn steps(&self) -> &[StepRef] {
        self.task_spec
            .as_ref()
            .map(|s| s.steps.as_slice())
            .unwrap_or_default()
    }
}
