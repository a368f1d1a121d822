//! Core domain models
//!
//! This module defines the pipeline and pipeline-run shapes handed over by
//! the cluster, plus the condition classification shared by runs and task
//! runs.

pub mod condition;
pub mod config;
pub mod pipeline;
pub mod run;

pub use condition::*;
pub use pipeline::*;
pub use run::*;
