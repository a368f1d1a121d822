use anyhow::{Context, Result};
use chrono::Utc;
use pipeline_status::cli::commands::{
    StepsCommand, SummaryCommand, TasksCommand, ValidateCommand, WatchCommand,
};
use pipeline_status::cli::output::*;
use pipeline_status::cli::{watch, Cli, Command};
use pipeline_status::core::PipelineDefinition;
use pipeline_status::status::{
    compute_task_status, pipeline_run_duration, pipeline_run_status, resolve_steps,
    resolve_task_statuses,
};
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG overrides the flag
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Summary(cmd) => show_summary(cmd)?,
        Command::Tasks(cmd) => show_tasks(cmd)?,
        Command::Steps(cmd) => show_steps(cmd)?,
        Command::Watch(cmd) => watch_run(cmd).await?,
        Command::Validate(cmd) => validate_pipeline(cmd)?,
    }

    Ok(())
}

fn require_pipeline(pipeline: Option<PipelineDefinition>) -> Result<PipelineDefinition> {
    pipeline.context("No pipeline given and the run carries no embedded pipelineSpec")
}

fn show_summary(cmd: &SummaryCommand) -> Result<()> {
    let (run, pipeline) = cmd.input.load().context("Failed to load manifests")?;
    if pipeline.is_none() {
        warn!("no pipeline definition available, counting zero declared tasks");
    }

    let histogram = compute_task_status(Some(&run), pipeline.as_ref());
    let run_status = pipeline_run_status(Some(&run));
    let duration = pipeline_run_duration(&run, Utc::now());

    if cmd.json {
        let data = serde_json::json!({
            "name": run.name(),
            "status": run_status,
            "duration": duration,
            "tasks": histogram,
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!(
        "{} {} {}{}",
        status_icon(run_status),
        style(run.name()).bold(),
        format_status(run_status),
        duration.map(|d| format!(" ({})", style(d).dim())).unwrap_or_default()
    );
    if !histogram.is_not_started() {
        println!("  {}", format_bar(&histogram, 40));
    }
    println!("{}", format_histogram(&histogram));

    Ok(())
}

fn show_tasks(cmd: &TasksCommand) -> Result<()> {
    let (run, pipeline) = cmd.input.load().context("Failed to load manifests")?;
    let pipeline = require_pipeline(pipeline)?;
    let tasks = resolve_task_statuses(&pipeline, &run, Utc::now());

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    println!("{} Tasks of {}:", INFO, style(run.name()).bold());
    for task in &tasks {
        println!("  {}", format_task(task));
    }

    Ok(())
}

fn show_steps(cmd: &StepsCommand) -> Result<()> {
    let (run, pipeline) = cmd.input.load().context("Failed to load manifests")?;
    let pipeline = require_pipeline(pipeline)?;
    let now = Utc::now();

    if let Some(name) = &cmd.task {
        if pipeline.task(name).is_none() {
            anyhow::bail!("Pipeline has no task named '{}'", name);
        }
    }

    let mut output = Vec::new();
    for resolved in resolve_task_statuses(&pipeline, &run, now) {
        if cmd.task.as_ref().is_some_and(|t| *t != resolved.name) {
            continue;
        }
        let Some(task) = pipeline.task(&resolved.name) else {
            continue;
        };
        let steps = resolve_steps(task, &resolved, now);
        output.push((resolved, steps));
    }

    if cmd.json {
        let data: Vec<_> = output
            .iter()
            .map(|(task, steps)| serde_json::json!({ "task": task.name, "steps": steps }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    for (task, steps) in &output {
        println!("  {}", format_task(task));
        if steps.is_empty() {
            println!("    {}", style("(no steps known)").dim());
        }
        for step in steps {
            println!("{}", format_step(step));
        }
    }

    Ok(())
}

async fn watch_run(cmd: &WatchCommand) -> Result<()> {
    println!(
        "{} Watching {} every {}s (Ctrl-C to stop)",
        INFO,
        style(cmd.input.run.display()).bold(),
        cmd.interval
    );

    let stop = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    let changes = watch::watch(
        &cmd.input,
        Duration::from_secs(cmd.interval.max(1)),
        |snapshot| {
            println!(
                "{} {} {}",
                status_icon(snapshot.run_status),
                format_status(snapshot.run_status),
                format_bar(&snapshot.histogram, 40)
            );
        },
        stop,
    )
    .await;

    println!("{} {} status change(s) observed", INFO, changes);
    Ok(())
}

fn validate_pipeline(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    match PipelineDefinition::from_file(&cmd.file) {
        Ok(pipeline) => {
            println!("{} Pipeline definition is valid!", CHECK);
            println!("  Tasks: {}", style(pipeline.tasks.len()).cyan());
            println!("  Finally tasks: {}", style(pipeline.finally_tasks.len()).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&pipeline)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}
