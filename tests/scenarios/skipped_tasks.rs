//! Test: tasks skipped by `when` expressions

use crate::helpers::*;
use pipeline_status::compute_task_status;

#[test]
fn test_skipped_tasks_keep_sum() {
    let pipeline = pipeline(&["fetch", "build", "deploy-staging", "deploy-prod"], &["notify"]);
    let run = RunBuilder::new()
        .condition("Unknown", "Running")
        .task_run("fetch", "True", "Succeeded")
        .task_run("build", "Unknown", "Running")
        .skipped("deploy-staging")
        .skipped("deploy-prod")
        .build();

    let histogram = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(histogram.skipped, 2);
    assert_eq!(histogram.succeeded + histogram.running + histogram.pending, 3);
    assert_eq!(histogram.pending, 1);
    assert_accounts_for(&histogram, &pipeline);
}

#[test]
fn test_skips_with_failure() {
    let pipeline = pipeline(&["fetch", "build", "deploy"], &["notify"]);
    let run = RunBuilder::new()
        .condition("Unknown", "Running")
        .task_run("fetch", "False", "Failed")
        .skipped("deploy")
        .build();

    let histogram = compute_task_status(Some(&run), Some(&pipeline));
    assert_eq!(histogram.failed, 1);
    assert_eq!(histogram.skipped, 1);
    assert_eq!(histogram.cancelled, 2);
    assert_accounts_for(&histogram, &pipeline);
}
