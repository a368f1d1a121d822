//! Human-readable durations for runs, task runs and steps

use crate::core::PipelineRun;
use chrono::{DateTime, Duration, Utc};

/// Format the span between `start` and `end` (or now when still running)
pub fn calculate_duration(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> String {
    calculate_duration_at(start, end, Utc::now())
}

/// Like [`calculate_duration`] with an explicit clock
pub fn calculate_duration_at(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> String {
    format_duration(end.unwrap_or(now) - start)
}

/// Short form: `45s`, `2m 5s`, `1h 0m 12s`. Negative spans clamp to zero.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

/// Duration of the whole run, `None` before it started
pub fn pipeline_run_duration(run: &PipelineRun, now: DateTime<Utc>) -> Option<String> {
    let status = run.status.as_ref()?;
    let start = status.start_time?;
    Some(calculate_duration_at(start, status.completion_time, now))
}
