use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use notebook_runner::config::{ConcurrencyPolicy, RunnerConfig};
use notebook_runner::consts::{
    DEFAULT_EXECUTOR, DEFAULT_HOST, DEFAULT_NOTEBOOK_DIR, DEFAULT_PORT, RUN_ROUTE,
    SUCCESS_MESSAGE, default_notebooks,
};
use notebook_runner::engine::Engine;
use notebook_runner::engine::sequential::SequentialRunner;
use notebook_runner::executor::papermill::{PapermillConfig, PapermillExecutor};
use notebook_runner::server::Application;
use notebook_runner::telemetry::init_tracing;

#[derive(Parser)]
#[command(
    name = "notebook-runner",
    version,
    about = "Run notebooks through papermill, in order, on POST /run-notebooks."
)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "NOTEBOOK_RUNNER_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "NOTEBOOK_RUNNER_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory holding the notebooks; relative paths are anchored at the crate directory
    #[arg(short = 'd', long, env = "NOTEBOOK_RUNNER_DIR", default_value = DEFAULT_NOTEBOOK_DIR)]
    notebook_dir: PathBuf,

    /// Notebook to run, relative to the notebook directory. Repeat to run several, in order.
    #[arg(short, long = "notebook", default_values_t = default_notebooks())]
    notebooks: Vec<String>,

    /// Program used to execute each notebook
    #[arg(short, long, env = "NOTEBOOK_RUNNER_EXECUTOR", default_value = DEFAULT_EXECUTOR)]
    executor: String,

    /// Extra argument passed to the executor before the notebook paths. Repeatable.
    #[arg(long = "executor-arg", allow_hyphen_values = true)]
    executor_args: Vec<String>,

    /// Reject a trigger while another run is still in progress
    #[arg(long, default_value_t = false)]
    single_flight: bool,

    /// Run the notebooks once and exit instead of serving HTTP
    #[arg(long, default_value_t = false)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing().context("failed to initialise logging")?;

    let concurrency = if cli.single_flight {
        ConcurrencyPolicy::SingleFlight
    } else {
        ConcurrencyPolicy::Unguarded
    };
    let config =
        RunnerConfig::new(cli.notebook_dir, cli.notebooks).with_concurrency(concurrency);

    let executor = Arc::new(PapermillExecutor::new(PapermillConfig {
        program: cli.executor,
        args: cli.executor_args,
        ..PapermillConfig::default()
    }));
    let runner = SequentialRunner::new(config, executor);
    tracing::info!(
        notebook_dir = %runner.config().notebook_dir.display(),
        notebooks = ?runner.config().notebooks,
        "Configured notebook chain"
    );
    let engine: Arc<dyn Engine> = Arc::new(runner);

    // Single run mode
    if cli.once {
        return match engine.run().await {
            Ok(report) => {
                println!(
                    "=> {} ({} notebook(s))",
                    SUCCESS_MESSAGE,
                    report.executed.len()
                );
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!("{}\n{}", e, e.details())),
        };
    }

    let address = format!("{}:{}", cli.host, cli.port);
    let listener =
        TcpListener::bind(&address).with_context(|| format!("failed to bind {}", address))?;
    let app = Application::build(listener, engine)?;

    tracing::info!(
        "Server is running on http://{}:{}{}",
        cli.host,
        app.port(),
        RUN_ROUTE
    );
    app.run_until_stopped().await?;
    Ok(())
}
