//! pipeline-status - task and step status roll-ups for Tekton pipeline runs

pub mod cli;
pub mod core;
pub mod status;

// Re-export commonly used types
pub use crate::core::{PipelineDefinition, PipelineRun, RunStatus};
pub use crate::status::{compute_step_status, compute_task_status, StepStatus, TaskStatusHistogram};
