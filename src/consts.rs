//! Project-wide constants.

/// Address the HTTP server binds to when none is given.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the HTTP server listens on when none is given.
pub const DEFAULT_PORT: u16 = 5000;

/// Base that relative notebook directories are anchored at: the crate's own
/// directory, independent of where the binary is started from.
pub const BASE_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// Directory holding the notebooks, relative to [`BASE_DIR`].
pub const DEFAULT_NOTEBOOK_DIR: &str = "../ML/notebooks";

/// Notebooks run on every trigger, in this order.
pub const DEFAULT_NOTEBOOKS: &[&str] = &["pso_implementation.ipynb"];

/// Command-line tool that executes a notebook.
pub const DEFAULT_EXECUTOR: &str = "papermill";

/// The only route the server exposes.
pub const RUN_ROUTE: &str = "/run-notebooks";

pub const SUCCESS_MESSAGE: &str = "All notebooks executed successfully and outputs saved.";

pub const BUSY_MESSAGE: &str = "A notebook run is already in progress";

/// Tracing target for captured notebook stdout, so it can be filtered apart
/// from the service log.
pub const NOTEBOOK_OUTPUT_TARGET: &str = "notebook_output";

/// The compiled-in notebook list as owned strings.
pub fn default_notebooks() -> Vec<String> {
    DEFAULT_NOTEBOOKS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_are_non_empty() {
        assert!(!DEFAULT_HOST.is_empty());
        assert!(!DEFAULT_NOTEBOOK_DIR.is_empty());
        assert!(!DEFAULT_EXECUTOR.is_empty());
        assert!(!SUCCESS_MESSAGE.is_empty());
        assert!(!DEFAULT_NOTEBOOKS.is_empty());
    }

    #[test]
    fn base_dir_is_absolute() {
        assert!(std::path::Path::new(BASE_DIR).is_absolute());
    }

    #[test]
    fn route_is_absolute() {
        assert!(RUN_ROUTE.starts_with('/'));
    }

    #[test]
    fn default_notebooks_keeps_order() {
        let owned = default_notebooks();
        assert_eq!(owned.len(), DEFAULT_NOTEBOOKS.len());
        for (name, expected) in owned.iter().zip(DEFAULT_NOTEBOOKS) {
            assert_eq!(name, expected);
        }
    }

    #[test]
    fn default_notebooks_are_notebook_files() {
        assert!(default_notebooks().iter().all(|n| n.ends_with(".ipynb")));
    }
}
