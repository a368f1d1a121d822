//! Builders for pipeline and run fixtures

use pipeline_status::core::{PipelineDefinition, PipelineRun};
use pipeline_status::TaskStatusHistogram;

/// A pipeline with the given main and finally task names
pub fn pipeline(tasks: &[&str], finally: &[&str]) -> PipelineDefinition {
    let list = |names: &[&str]| {
        names
            .iter()
            .map(|n| format!("    - name: {}\n", n))
            .collect::<String>()
    };

    let mut yaml = String::from("kind: Pipeline\nspec:\n  tasks:\n");
    yaml.push_str(&list(tasks));
    if !finally.is_empty() {
        yaml.push_str("  finally:\n");
        yaml.push_str(&list(finally));
    }

    PipelineDefinition::from_yaml(&yaml).expect("fixture pipeline should parse")
}

/// Builder for `PipelineRun` manifests
pub struct RunBuilder {
    condition: Option<(String, String)>,
    spec_status: Option<String>,
    task_runs: Vec<(String, String, String)>,
    skipped: Vec<String>,
}

impl RunBuilder {
    pub fn new() -> Self {
        Self {
            condition: None,
            spec_status: None,
            task_runs: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Overall `Succeeded` condition
    pub fn condition(mut self, status: &str, reason: &str) -> Self {
        self.condition = Some((status.to_string(), reason.to_string()));
        self
    }

    pub fn spec_status(mut self, status: &str) -> Self {
        self.spec_status = Some(status.to_string());
        self
    }

    /// Task run for `task` with the given `Succeeded` condition
    pub fn task_run(mut self, task: &str, status: &str, reason: &str) -> Self {
        self.task_runs
            .push((task.to_string(), status.to_string(), reason.to_string()));
        self
    }

    pub fn skipped(mut self, task: &str) -> Self {
        self.skipped.push(task.to_string());
        self
    }

    pub fn yaml(&self) -> String {
        let mut yaml = String::from("kind: PipelineRun\nmetadata:\n  name: scenario-run\n");
        if let Some(status) = &self.spec_status {
            yaml.push_str(&format!("spec:\n  status: {}\n", status));
        }

        let has_status =
            self.condition.is_some() || !self.task_runs.is_empty() || !self.skipped.is_empty();
        if !has_status {
            return yaml;
        }

        yaml.push_str("status:\n");
        if let Some((status, reason)) = &self.condition {
            yaml.push_str(&format!(
                "  conditions:\n    - type: Succeeded\n      status: \"{}\"\n      reason: {}\n",
                status, reason
            ));
        }
        if !self.task_runs.is_empty() {
            yaml.push_str("  taskRuns:\n");
            for (i, (task, status, reason)) in self.task_runs.iter().enumerate() {
                yaml.push_str(&format!(
                    concat!(
                        "    scenario-run-{task}-{i:05}:\n",
                        "      pipelineTaskName: {task}\n",
                        "      status:\n",
                        "        conditions:\n",
                        "          - type: Succeeded\n",
                        "            status: \"{status}\"\n",
                        "            reason: {reason}\n",
                    ),
                    task = task,
                    i = i,
                    status = status,
                    reason = reason,
                ));
            }
        }
        if !self.skipped.is_empty() {
            yaml.push_str("  skippedTasks:\n");
            for task in &self.skipped {
                yaml.push_str(&format!("    - name: {}\n", task));
            }
        }
        yaml
    }

    pub fn build(&self) -> PipelineRun {
        PipelineRun::from_yaml(&self.yaml()).expect("fixture run should parse")
    }
}

/// Assert the histogram accounts for every declared task
pub fn assert_accounts_for(histogram: &TaskStatusHistogram, pipeline: &PipelineDefinition) {
    assert!(!histogram.is_not_started(), "run should have started: {:?}", histogram);
    assert_eq!(
        histogram.total(),
        pipeline.total_task_count(),
        "histogram {:?} should sum to the task count",
        histogram
    );
}
