use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{ChainState, Engine, RunReport};
use crate::config::{ConcurrencyPolicy, RunnerConfig};
use crate::consts::NOTEBOOK_OUTPUT_TARGET;
use crate::error::RunError;
use crate::executor::{Executor, JobOutcome};

/// Runs the configured notebooks one after another, stopping at the first
/// failure. Wires together a [`RunnerConfig`] and an [`Executor`].
pub struct SequentialRunner {
    config: RunnerConfig,
    executor: Arc<dyn Executor>,
    in_flight: Mutex<()>,
}

impl SequentialRunner {
    pub fn new(config: RunnerConfig, executor: Arc<dyn Executor>) -> Self {
        Self {
            config,
            executor,
            in_flight: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }
}

#[async_trait]
impl Engine for SequentialRunner {
    #[tracing::instrument(name = "Run notebook chain", skip_all)]
    async fn run(&self) -> Result<RunReport, RunError> {
        // Held until the chain ends. `try_lock` never waits: a second trigger
        // is turned away instead of queued.
        let _guard = match self.config.concurrency {
            ConcurrencyPolicy::Unguarded => None,
            ConcurrencyPolicy::SingleFlight => match self.in_flight.try_lock() {
                Ok(guard) => Some(guard),
                Err(_) => {
                    tracing::warn!("Rejected trigger: a chain is already running");
                    return Err(RunError::Busy);
                }
            },
        };

        let jobs = self.config.jobs().map_err(RunError::Resolve)?;
        let mut state = ChainState::Idle;
        tracing::debug!(
            %state,
            executor = self.executor.name(),
            notebooks = jobs.len(),
            "Starting chain"
        );

        let mut executed = Vec::with_capacity(jobs.len());
        for (index, job) in jobs.iter().enumerate() {
            state = ChainState::Running { index };
            tracing::debug!(
                %state,
                notebook = %job.name,
                path = %job.path.display(),
                "Executing notebook"
            );

            let outcome = self.executor.execute(job).await;
            tracing::debug!(
                notebook = %job.name,
                success = outcome.is_success(),
                "Notebook finished"
            );

            match outcome {
                JobOutcome::Succeeded { stdout } => {
                    tracing::info!("Executed {} successfully.", job.name);
                    tracing::info!(
                        target: NOTEBOOK_OUTPUT_TARGET,
                        notebook = %job.name,
                        "{}",
                        stdout
                    );
                    executed.push(job.name.clone());
                }
                JobOutcome::Failed { stderr } => {
                    state = ChainState::Failed { index };
                    tracing::error!(%state, "Error running {}: {}", job.name, stderr);
                    return Err(RunError::JobFailed {
                        job: job.name.clone(),
                        details: stderr,
                    });
                }
            }
        }

        state = ChainState::Succeeded;
        tracing::info!(%state, executed = executed.len(), "All notebooks executed");
        Ok(RunReport { executed })
    }
}
