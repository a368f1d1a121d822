//! Command-line interface

pub mod commands;
pub mod output;
pub mod watch;

use clap::{Parser, Subcommand};
use commands::{StepsCommand, SummaryCommand, TasksCommand, ValidateCommand, WatchCommand};

/// Status roll-ups for Tekton pipeline runs
#[derive(Debug, Parser, Clone)]
#[command(name = "pipeline-status")]
#[command(author = "Pipeline Status Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Task and step status roll-ups for Tekton pipeline runs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Show how many tasks of a run are in each state
    Summary(SummaryCommand),

    /// Show the status of each task of a run
    Tasks(TasksCommand),

    /// Show step statuses of a run's tasks
    Steps(StepsCommand),

    /// Follow a run file and print changes
    Watch(WatchCommand),

    /// Validate a pipeline definition
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;
