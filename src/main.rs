mod cli;
mod config;
mod error;
mod index;
mod logging;
mod orchestrator;
mod output;
mod plot;
mod process;

use anyhow::{Context, Result};
use config::Config;
use orchestrator::Orchestrator;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Load config; CLI flags override it.
    let cfg = Config::load();
    let orchestrator = Orchestrator::new(
        cfg.resolve_path(args.fpm_binary_path.as_deref(), config::FPM_BINARY_PATH, "fpm"),
        cfg.resolve_path(args.output_dir.as_deref(), config::OUTPUT_DIR, "output"),
        cfg.resolve_path(args.index.as_deref(), config::INDEX_PATH, "index.json"),
    );

    let log_filter = cfg.log_filter();
    let (subscriber, rejected_filter) = logging::build_subscriber(&log_filter);
    tracing::subscriber::with_default(subscriber, || {
        if let Some(reason) = rejected_filter {
            tracing::warn!(filter = %log_filter, %reason, "Invalid SIMRUN_LOG filter, falling back to info.");
        }
        tracing::debug!(config = %cfg.config_path.display(), "Configuration loaded.");
        orchestrator.run(&args.simulation_id)
    })
    .with_context(|| format!("simulation '{}' failed", args.simulation_id))?;

    Ok(())
}
