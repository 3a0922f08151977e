use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use super::{Executor, JobOutcome};
use crate::config::Job;
use crate::consts::DEFAULT_EXECUTOR;

/// Maximum captured stdout kept per notebook. Anything beyond this is truncated.
const MAX_STDOUT_BYTES: usize = 50_000;

/// Configuration for the papermill executor.
#[derive(Debug, Clone)]
pub struct PapermillConfig {
    /// Program to launch, `papermill` unless overridden.
    pub program: String,
    /// Arguments placed before the input and output paths.
    pub args: Vec<String>,
    pub max_stdout_bytes: usize,
}

impl Default for PapermillConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_EXECUTOR.to_string(),
            args: Vec::new(),
            max_stdout_bytes: MAX_STDOUT_BYTES,
        }
    }
}

/// Executes a notebook in place: the resolved path is both input and output,
/// so every run overwrites the notebook with its executed version.
pub struct PapermillExecutor {
    config: PapermillConfig,
}

impl PapermillExecutor {
    pub fn new(config: PapermillConfig) -> Self {
        Self { config }
    }

    fn command(&self, job: &Job) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .arg(&job.path)
            .arg(&job.path)
            .stdin(Stdio::null());
        cmd
    }

    fn truncate_output(output: &str, max_bytes: usize) -> String {
        if output.len() <= max_bytes {
            return output.to_string();
        }
        let mut end = max_bytes;
        while !output.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}\n\n[truncated: showing {}/{} bytes]",
            &output[..end],
            end,
            output.len()
        )
    }
}

#[async_trait]
impl Executor for PapermillExecutor {
    fn name(&self) -> &str {
        &self.config.program
    }

    async fn execute(&self, job: &Job) -> JobOutcome {
        let output = match self.command(job).output().await {
            Ok(output) => output,
            Err(e) => {
                return JobOutcome::Failed {
                    stderr: format!("failed to launch {}: {}", self.config.program, e),
                };
            }
        };

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            JobOutcome::Succeeded {
                stdout: Self::truncate_output(&stdout, self.config.max_stdout_bytes),
            }
        } else {
            tracing::debug!(
                notebook = %job.name,
                status = %output.status,
                "{} exited unsuccessfully",
                self.config.program
            );
            JobOutcome::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
        }
    }
}
