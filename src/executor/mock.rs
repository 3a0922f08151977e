use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{Executor, JobOutcome};
use crate::config::Job;

/// A scripted executor for tests. Every notebook succeeds unless told
/// otherwise, and every invocation is recorded in order.
#[derive(Default)]
pub struct ScriptedExecutor {
    failures: HashMap<String, String>,
    calls: Mutex<Vec<Job>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the named notebook fail with the given stderr.
    pub fn failing_on(mut self, notebook: &str, stderr: &str) -> Self {
        self.failures
            .insert(notebook.to_string(), stderr.to_string());
        self
    }

    /// Names of the notebooks executed so far, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.jobs().into_iter().map(|job| job.name).collect()
    }

    /// Full jobs executed so far, in invocation order.
    pub fn jobs(&self) -> Vec<Job> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn execute(&self, job: &Job) -> JobOutcome {
        self.calls.lock().unwrap().push(job.clone());
        match self.failures.get(&job.name) {
            Some(stderr) => JobOutcome::Failed {
                stderr: stderr.clone(),
            },
            None => JobOutcome::Succeeded {
                stdout: format!("executed {}", job.name),
            },
        }
    }
}
