//! Test: failure and cancellation propagate to unreached tasks

use crate::helpers::*;
use pipeline_status::status::pipeline_run_status;
use pipeline_status::{compute_task_status, RunStatus};

#[test]
fn test_failure_sweeps_remaining_tasks_into_cancelled() {
    let pipeline = pipeline(&["lint", "test", "build", "deploy"], &[]);
    let run = RunBuilder::new()
        .condition("Unknown", "Running")
        .task_run("lint", "False", "Failed")
        .build();

    let histogram = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(histogram.failed, 1);
    assert_eq!(histogram.cancelled, 3);
    assert_eq!(histogram.pending, 0);
    assert_accounts_for(&histogram, &pipeline);
}

#[test]
fn test_user_cancelled_run() {
    let pipeline = pipeline(&["fetch", "build", "deploy"], &["cleanup"]);
    let run = RunBuilder::new()
        .spec_status("PipelineRunCancelled")
        .condition("False", "Cancelled")
        .task_run("fetch", "True", "Succeeded")
        .task_run("build", "False", "TaskRunCancelled")
        .build();

    let histogram = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(histogram.succeeded, 1);
    assert_eq!(histogram.cancelled, 3);
    assert_accounts_for(&histogram, &pipeline);
    assert_eq!(pipeline_run_status(Some(&run)), RunStatus::Cancelled);
}

#[test]
fn test_cancel_requested_but_not_acknowledged() {
    let pipeline = pipeline(&["fetch", "build"], &[]);
    let run = RunBuilder::new()
        .spec_status("PipelineRunCancelled")
        .condition("Unknown", "Running")
        .task_run("fetch", "Unknown", "Running")
        .build();

    // Still running until Tekton reports the cancellation
    let histogram = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(histogram.running, 1);
    assert_eq!(histogram.pending, 1);
    assert_eq!(pipeline_run_status(Some(&run)), RunStatus::Cancelling);
}

#[test]
fn test_cancelled_before_any_task_run() {
    let pipeline = pipeline(&["fetch", "build"], &["notify"]);
    let run = RunBuilder::new().spec_status("PipelineRunCancelled").build();

    let histogram = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(histogram.cancelled, 3);
    assert_accounts_for(&histogram, &pipeline);
}

#[test]
fn test_failed_before_any_task_run() {
    let pipeline = pipeline(&["fetch", "build"], &[]);
    let run = RunBuilder::new()
        .condition("False", "CouldntGetPipeline")
        .build();

    let histogram = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(histogram.cancelled, 2);
    assert_eq!(pipeline_run_status(Some(&run)), RunStatus::Failed);
}

#[test]
fn test_finished_cancellation_with_legacy_reasons() {
    let pipeline = pipeline(&["fetch", "build", "deploy"], &[]);
    for directive in ["PipelineRunCancelled", "PipelineRunStopped"] {
        let run = RunBuilder::new()
            .spec_status(directive)
            .condition("False", directive)
            .task_run("fetch", "True", "Succeeded")
            .build();

        assert_eq!(pipeline_run_status(Some(&run)), RunStatus::Cancelled, "{}", directive);
        let histogram = compute_task_status(Some(&run), Some(&pipeline));
        assert_eq!(histogram.succeeded, 1, "{}", directive);
        assert_eq!(histogram.cancelled, 2, "{}", directive);
        assert_eq!(histogram.pending, 0, "{}", directive);
        assert_accounts_for(&histogram, &pipeline);
    }
}
