//! Errors a notebook chain can end with.

use crate::consts::BUSY_MESSAGE;

#[derive(thiserror::Error)]
pub enum RunError {
    /// A notebook failed. Carries the executor's captured error stream.
    #[error("Failed to execute {job}")]
    JobFailed { job: String, details: String },

    /// Another chain is in progress and the runner only allows one.
    #[error("{}", BUSY_MESSAGE)]
    Busy,

    #[error("Failed to resolve the notebook directory")]
    Resolve(#[source] std::io::Error),
}

impl RunError {
    /// Diagnostic text shown to the caller next to the error message.
    pub fn details(&self) -> String {
        match self {
            RunError::JobFailed { details, .. } => details.clone(),
            RunError::Busy => String::new(),
            RunError::Resolve(e) => e.to_string(),
        }
    }
}

impl std::fmt::Debug for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

pub fn error_chain_fmt(
    f: &mut std::fmt::Formatter<'_>,
    e: &impl std::error::Error,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_failure_names_the_notebook() {
        let err = RunError::JobFailed {
            job: "a.ipynb".to_string(),
            details: "kernel error".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to execute a.ipynb");
        assert_eq!(err.details(), "kernel error");
    }

    #[test]
    fn busy_has_no_details() {
        assert_eq!(RunError::Busy.to_string(), BUSY_MESSAGE);
        assert!(RunError::Busy.details().is_empty());
    }

    #[test]
    fn debug_includes_source_chain() {
        let err = RunError::Resolve(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such directory",
        ));
        let debug = format!("{:?}", err);
        assert!(debug.contains("Failed to resolve the notebook directory"));
        assert!(debug.contains("Caused by:"));
        assert!(debug.contains("no such directory"));
    }
}
