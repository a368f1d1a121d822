//! CLI output formatting

use crate::{
    core::RunStatus,
    status::{ResolvedTask, StepStatus, TaskStatusHistogram},
};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static SKIP: Emoji<'_, '_> = Emoji("⏭️  ", "- ");

/// Icon for a status
pub fn status_icon(status: RunStatus) -> Emoji<'static, 'static> {
    match status {
        RunStatus::Succeeded => CHECK,
        RunStatus::Failed | RunStatus::FailedToStart => CROSS,
        RunStatus::Running | RunStatus::InProgress | RunStatus::Cancelling => SPINNER,
        RunStatus::Cancelled => WARN,
        RunStatus::Skipped => SKIP,
        RunStatus::Pending | RunStatus::PipelineNotStarted | RunStatus::Idle => INFO,
    }
}

/// Format a status for display
pub fn format_status(status: RunStatus) -> String {
    let label = status.as_str().to_uppercase();
    match status {
        RunStatus::Succeeded => style(label).green().to_string(),
        RunStatus::Failed | RunStatus::FailedToStart => style(label).red().to_string(),
        RunStatus::Running | RunStatus::InProgress => style(label).yellow().to_string(),
        RunStatus::Cancelled | RunStatus::Cancelling => style(label).yellow().to_string(),
        RunStatus::Skipped
        | RunStatus::Pending
        | RunStatus::PipelineNotStarted
        | RunStatus::Idle => style(label).dim().to_string(),
    }
}

/// Bar of `width` cells split by bucket, e.g. `[#####xx...]`
pub fn format_bar(histogram: &TaskStatusHistogram, width: usize) -> String {
    let total = histogram.total();
    if total == 0 {
        return format!("[{}]", " ".repeat(width));
    }

    let mut bar = String::new();
    let mut used = 0;
    for (status, count) in histogram.iter() {
        let cells = count * width / total;
        used += cells;
        let fill = match status {
            RunStatus::Succeeded => style("#".repeat(cells)).green(),
            RunStatus::Failed => style("x".repeat(cells)).red(),
            RunStatus::Running => style(">".repeat(cells)).yellow(),
            RunStatus::Cancelled => style("-".repeat(cells)).yellow(),
            _ => style(".".repeat(cells)).dim(),
        };
        bar.push_str(&fill.to_string());
    }
    // Rounding leftovers
    bar.push_str(&" ".repeat(width.saturating_sub(used)));

    format!("[{}]", bar)
}

/// One line per non-empty bucket
pub fn format_histogram(histogram: &TaskStatusHistogram) -> String {
    if histogram.is_not_started() {
        return format!("{} {}", INFO, style("Pipeline not started").dim());
    }

    histogram
        .iter()
        .map(|(status, count)| {
            format!("  {} {:<12} {}", status_icon(status), status.as_str(), count)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A task line: icon, name, status, duration
pub fn format_task(task: &ResolvedTask) -> String {
    let duration = task
        .view
        .duration
        .as_deref()
        .map(|d| format!(" ({})", style(d).dim()))
        .unwrap_or_default();

    format!(
        "{} {} {}{}",
        status_icon(task.status()),
        style(&task.name).bold(),
        format_status(task.status()),
        duration
    )
}

/// A step line, indented under its task
pub fn format_step(step: &StepStatus) -> String {
    let duration = step
        .duration
        .as_deref()
        .map(|d| format!(" ({})", style(d).dim()))
        .unwrap_or_default();

    format!(
        "    {} {} {}{}",
        status_icon(step.status),
        style(&step.name).cyan(),
        format_status(step.status),
        duration
    )
}
