//! Loading pipeline and run manifests from YAML or JSON

use crate::core::{pipeline::PipelineDefinition, run::PipelineRun};
use serde_yaml::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading manifests
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Expected a {expected} manifest, found kind '{found}'")]
    WrongKind { expected: &'static str, found: String },

    #[error("Pipeline task name must not be empty")]
    EmptyTaskName,

    #[error("Duplicate pipeline task name: {0}")]
    DuplicateTask(String),

    #[error("Task '{task}' runs after non-existent task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },
}

pub type Result<T> = std::result::Result<T, ManifestError>;

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Check the `kind` field when the document carries one
fn check_kind(doc: &Value, expected: &'static str) -> Result<()> {
    match doc.get("kind").and_then(Value::as_str) {
        Some(kind) if kind != expected => Err(ManifestError::WrongKind {
            expected,
            found: kind.to_string(),
        }),
        _ => Ok(()),
    }
}

impl PipelineDefinition {
    /// Load a pipeline from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse a pipeline from a full `Pipeline` manifest or a bare spec
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let doc: Value = serde_yaml::from_str(yaml)?;
        check_kind(&doc, "Pipeline")?;

        let spec = if doc.get("kind").is_some() {
            doc.get("spec").cloned().unwrap_or(doc)
        } else {
            doc
        };

        let pipeline: PipelineDefinition = serde_yaml::from_value(spec)?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Validate task names and `runAfter` references
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (_, task) in self.all_tasks() {
            if task.name.trim().is_empty() {
                return Err(ManifestError::EmptyTaskName);
            }
            if !seen.insert(task.name.as_str()) {
                return Err(ManifestError::DuplicateTask(task.name.clone()));
            }
        }

        for (_, task) in self.all_tasks() {
            for dep in &task.run_after {
                if !seen.contains(dep.as_str()) {
                    return Err(ManifestError::UnknownDependency {
                        task: task.name.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl PipelineRun {
    /// Load a run from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse a `PipelineRun` manifest
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let doc: Value = serde_yaml::from_str(yaml)?;
        check_kind(&doc, "PipelineRun")?;
        Ok(serde_yaml::from_value(doc)?)
    }
}
