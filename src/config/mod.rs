//! Runner configuration: where the notebooks live, which ones run, and in
//! what order.
//!
//! Built once at startup and handed to the
//! [`SequentialRunner`](crate::engine::sequential::SequentialRunner). Nothing
//! here changes while the process is running.

use std::io;
use std::path::{Path, PathBuf};

use crate::consts::{BASE_DIR, DEFAULT_NOTEBOOK_DIR, default_notebooks};

/// What to do with a trigger that arrives while another chain is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyPolicy {
    /// Every trigger starts its own chain, even if one is already running.
    #[default]
    Unguarded,
    /// At most one chain at a time. Extra triggers are rejected.
    SingleFlight,
}

/// A single notebook to execute: its configured name and resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub notebook_dir: PathBuf,
    pub notebooks: Vec<String>,
    pub concurrency: ConcurrencyPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            notebook_dir: PathBuf::from(DEFAULT_NOTEBOOK_DIR),
            notebooks: default_notebooks(),
            concurrency: ConcurrencyPolicy::default(),
        }
    }
}

impl RunnerConfig {
    pub fn new(notebook_dir: impl Into<PathBuf>, notebooks: Vec<String>) -> Self {
        Self {
            notebook_dir: notebook_dir.into(),
            notebooks,
            ..Self::default()
        }
    }

    pub fn with_concurrency(mut self, concurrency: ConcurrencyPolicy) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Resolve every notebook against the notebook directory, keeping the
    /// configured order. Relative directories are anchored at [`BASE_DIR`],
    /// never at the working directory.
    pub fn jobs(&self) -> io::Result<Vec<Job>> {
        if self.notebook_dir.as_os_str().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "notebook directory is empty",
            ));
        }
        let dir = if self.notebook_dir.is_absolute() {
            self.notebook_dir.clone()
        } else {
            Path::new(BASE_DIR).join(&self.notebook_dir)
        };
        Ok(self
            .notebooks
            .iter()
            .map(|name| Job {
                name: name.clone(),
                path: dir.join(name),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn default_uses_compiled_in_list() {
        let config = RunnerConfig::default();
        assert_eq!(config.notebook_dir, PathBuf::from(DEFAULT_NOTEBOOK_DIR));
        assert_eq!(config.notebooks, default_notebooks());
        assert_eq!(config.concurrency, ConcurrencyPolicy::Unguarded);
    }

    #[test]
    fn jobs_keep_configured_order() {
        let config = RunnerConfig::new(
            "/srv/notebooks",
            names(&["b.ipynb", "a.ipynb", "c.ipynb"]),
        );
        let jobs = config.jobs().unwrap();

        let order: Vec<_> = jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(order, ["b.ipynb", "a.ipynb", "c.ipynb"]);
    }

    #[test]
    fn jobs_join_absolute_directory() {
        let config = RunnerConfig::new("/srv/notebooks", names(&["a.ipynb"]));
        let jobs = config.jobs().unwrap();
        assert_eq!(jobs[0].path, PathBuf::from("/srv/notebooks/a.ipynb"));
    }

    #[test]
    fn relative_directory_is_anchored_at_base_dir() {
        let config = RunnerConfig::new("notebooks", names(&["a.ipynb"]));
        let jobs = config.jobs().unwrap();

        let expected = Path::new(BASE_DIR).join("notebooks").join("a.ipynb");
        assert!(jobs[0].path.is_absolute());
        assert_eq!(jobs[0].path, expected);
    }

    #[test]
    fn default_directory_is_a_sibling_of_the_crate() {
        let jobs = RunnerConfig::default().jobs().unwrap();

        let expected = Path::new(BASE_DIR)
            .join("../ML/notebooks")
            .join("pso_implementation.ipynb");
        assert_eq!(jobs[0].path, expected);
    }

    #[test]
    fn empty_list_resolves_to_no_jobs() {
        let config = RunnerConfig::new("/srv/notebooks", vec![]);
        assert!(config.jobs().unwrap().is_empty());
    }

    #[test]
    fn empty_directory_fails_to_resolve() {
        let config = RunnerConfig::new("", names(&["a.ipynb"]));
        let err = config.jobs().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn with_concurrency_overrides_policy() {
        let config =
            RunnerConfig::default().with_concurrency(ConcurrencyPolicy::SingleFlight);
        assert_eq!(config.concurrency, ConcurrencyPolicy::SingleFlight);
    }
}
