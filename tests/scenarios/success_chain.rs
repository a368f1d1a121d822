//! Test: runs that progress normally

use crate::helpers::*;
use pipeline_status::status::pipeline_run_status;
use pipeline_status::{compute_task_status, RunStatus, TaskStatusHistogram};

#[test]
fn test_null_run_and_pipeline() {
    assert_eq!(
        compute_task_status(None, None),
        TaskStatusHistogram {
            not_started: 1,
            ..Default::default()
        }
    );
}

#[test]
fn test_run_without_status_is_not_started() {
    let pipeline = pipeline(&["fetch", "build"], &[]);
    let run = RunBuilder::new().build();

    let histogram = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(histogram, TaskStatusHistogram::not_started());
    assert_eq!(pipeline_run_status(Some(&run)), RunStatus::PipelineNotStarted);
}

#[test]
fn test_first_of_three_succeeded() {
    let pipeline = pipeline(&["fetch", "build", "deploy"], &[]);
    let run = RunBuilder::new()
        .condition("Unknown", "Running")
        .task_run("fetch", "True", "Succeeded")
        .build();

    let histogram = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(
        histogram,
        TaskStatusHistogram {
            succeeded: 1,
            pending: 2,
            ..Default::default()
        }
    );
    assert_accounts_for(&histogram, &pipeline);
}

#[test]
fn test_fully_succeeded_run_with_finally() {
    let pipeline = pipeline(&["fetch", "build"], &["notify"]);
    let run = RunBuilder::new()
        .condition("True", "Succeeded")
        .task_run("fetch", "True", "Succeeded")
        .task_run("build", "True", "Succeeded")
        .task_run("notify", "True", "Succeeded")
        .build();

    let histogram = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(histogram.succeeded, pipeline.total_task_count());
    assert_eq!(histogram.total(), histogram.succeeded);
    assert_eq!(pipeline_run_status(Some(&run)), RunStatus::Succeeded);
}

#[test]
fn test_pending_run_counts_all_tasks_pending() {
    let pipeline = pipeline(&["fetch", "build"], &["notify"]);
    let run = RunBuilder::new().spec_status("PipelineRunPending").build();

    let histogram = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(histogram.pending, 3);
    assert_accounts_for(&histogram, &pipeline);
}

#[test]
fn test_rollup_is_idempotent() {
    let pipeline = pipeline(&["a", "b", "c"], &["d"]);
    let run = RunBuilder::new()
        .condition("Unknown", "Running")
        .task_run("a", "True", "Succeeded")
        .task_run("b", "Unknown", "Running")
        .build();

    let first = compute_task_status(Some(&run), Some(&pipeline));
    let second = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(first, second);
    assert_eq!(first.running, 1);
    assert_eq!(first.pending, 2);
}
