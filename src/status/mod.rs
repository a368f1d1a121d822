//! Status roll-ups derived from a pipeline and one of its runs
//!
//! Everything here is a pure function of its inputs; callers re-run it on
//! every refresh of the run.

pub mod aggregate;
pub mod duration;
pub mod steps;
pub mod tasks;

pub use aggregate::{compute_task_status, pipeline_run_status, TaskStatusHistogram};
pub use duration::{calculate_duration, format_duration, pipeline_run_duration};
pub use steps::{compute_step_status, compute_step_status_at, StepStatus, TaskRunView};
pub use tasks::{resolve_steps, resolve_task_statuses, ResolvedTask};
