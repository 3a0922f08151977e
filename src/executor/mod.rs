pub mod mock;
pub mod papermill;

use async_trait::async_trait;

use crate::config::Job;

/// Outcome of a single notebook execution. A failed notebook is information
/// for the runner, not an error of the executor itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Succeeded { stdout: String },
    Failed { stderr: String },
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Succeeded { .. })
    }
}

/// Runs one notebook to completion. Could be papermill, or a test script.
#[async_trait]
pub trait Executor: Send + Sync {
    fn name(&self) -> &str;
    async fn execute(&self, job: &Job) -> JobOutcome;
}
