//! Scenario-based tests for pipeline-status

mod helpers;

mod cancellation;
mod skipped_tasks;
mod success_chain;
