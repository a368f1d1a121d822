//! Polling loop behind the `watch` command

use crate::cli::commands::RunInput;
use crate::core::{config::ManifestError, RunStatus};
use crate::status::{compute_task_status, pipeline_run_status, TaskStatusHistogram};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// What one refresh of the run file produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub run_status: RunStatus,
    pub histogram: TaskStatusHistogram,
}

/// Load the manifests and roll them up once
pub fn snapshot(input: &RunInput) -> Result<Snapshot, ManifestError> {
    let (run, pipeline) = input.load()?;
    Ok(Snapshot {
        run_status: pipeline_run_status(Some(&run)),
        histogram: compute_task_status(Some(&run), pipeline.as_ref()),
    })
}

/// Re-read the run every `interval`, calling `on_change` whenever the
/// snapshot differs from the previous one.
///
/// Returns the number of changes reported, once the run reaches a terminal
/// status or `stop` resolves. Unreadable files are logged and retried.
pub async fn watch<F, S>(input: &RunInput, interval: Duration, mut on_change: F, stop: S) -> usize
where
    F: FnMut(&Snapshot),
    S: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(interval);
    let mut last: Option<Snapshot> = None;
    let mut changes = 0;
    tokio::pin!(stop);

    loop {
        tokio::select! {
            _ = &mut stop => {
                debug!("watch stopped");
                return changes;
            }
            _ = ticker.tick() => {
                let current = match snapshot(input) {
                    Ok(current) => current,
                    Err(e) => {
                        warn!(error = %e, "failed to refresh run");
                        continue;
                    }
                };

                if last != Some(current) {
                    on_change(&current);
                    changes += 1;
                    last = Some(current);
                }

                if current.run_status.is_terminal() {
                    debug!(status = %current.run_status, "run finished");
                    return changes;
                }
            }
        }
    }
}
