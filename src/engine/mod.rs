pub mod sequential;

use async_trait::async_trait;
use std::fmt;

use crate::error::RunError;

/// Where a single chain is. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Idle,
    Running { index: usize },
    Succeeded,
    Failed { index: usize },
}

impl fmt::Display for ChainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainState::Idle => write!(f, "idle"),
            ChainState::Running { index } => write!(f, "running({})", index),
            ChainState::Succeeded => write!(f, "succeeded"),
            ChainState::Failed { index } => write!(f, "failed({})", index),
        }
    }
}

/// What a successful chain did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Notebooks executed, in the order they ran.
    pub executed: Vec<String>,
}

/// The outermost boundary. The HTTP layer and main.rs only know this trait.
#[async_trait]
pub trait Engine: Send + Sync {
    async fn run(&self) -> Result<RunReport, RunError>;
}
