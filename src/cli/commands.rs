//! CLI command definitions

use crate::core::{config::ManifestError, PipelineDefinition, PipelineRun};
use clap::Args;
use std::path::PathBuf;

/// Manifests shared by every run-inspecting command
#[derive(Debug, Args, Clone)]
pub struct RunInput {
    /// Path to the PipelineRun YAML/JSON file
    #[arg(short, long)]
    pub run: PathBuf,

    /// Path to the Pipeline YAML/JSON file (defaults to the spec embedded in the run)
    #[arg(short, long)]
    pub pipeline: Option<PathBuf>,
}

impl RunInput {
    /// Load the run and its pipeline definition
    pub fn load(&self) -> Result<(PipelineRun, Option<PipelineDefinition>), ManifestError> {
        let run = PipelineRun::from_file(&self.run)?;
        let pipeline = match &self.pipeline {
            Some(path) => Some(PipelineDefinition::from_file(path)?),
            None => run.embedded_pipeline().cloned(),
        };
        Ok((run, pipeline))
    }
}

/// Show the task status histogram of a run
#[derive(Debug, Args, Clone)]
pub struct SummaryCommand {
    #[command(flatten)]
    pub input: RunInput,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Show the status of every task of a run
#[derive(Debug, Args, Clone)]
pub struct TasksCommand {
    #[command(flatten)]
    pub input: RunInput,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Show step statuses of a run's tasks
#[derive(Debug, Args, Clone)]
pub struct StepsCommand {
    #[command(flatten)]
    pub input: RunInput,

    /// Only show this task
    #[arg(short, long)]
    pub task: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Re-read a run file and print the summary whenever it changes
#[derive(Debug, Args, Clone)]
pub struct WatchCommand {
    #[command(flatten)]
    pub input: RunInput,

    /// Seconds between refreshes
    #[arg(short, long, default_value_t = 2)]
    pub interval: u64,
}

/// Validate a pipeline definition
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML/JSON file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
