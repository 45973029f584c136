//! Resolve → run → load → plot for one simulation.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use tracing::{debug, error, info, info_span, warn};

use crate::error::{Error, Result};
use crate::index::{load_index, SimulationDescriptor};
use crate::{output, plot, process};

/// Files produced by one run, named `<id>_<unix_ts>.{log,png}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArtifacts {
    pub log_path: PathBuf,
    pub plot_path: PathBuf,
}

impl RunArtifacts {
    pub fn new(output_dir: &Path, simulation_id: &str, unix_ts: u64) -> Self {
        let stem = format!("{simulation_id}_{unix_ts}");
        Self {
            log_path: output_dir.join(format!("{stem}.log")),
            plot_path: output_dir.join(format!("{stem}.png")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
    pub binary_path: PathBuf,
    pub output_dir: PathBuf,
    pub index_path: PathBuf,
}

impl Orchestrator {
    pub fn new(binary_path: PathBuf, output_dir: PathBuf, index_path: PathBuf) -> Self {
        Self { binary_path, output_dir, index_path }
    }

    pub fn run(&self, simulation_id: &str) -> Result<RunArtifacts> {
        let span = info_span!("simulation", simulation_id = %simulation_id);
        let _guard = span.enter();

        let simulation = self.resolve(simulation_id)?;
        let artifacts = self.execute(&simulation)?;

        let data = output::load_output_data(&simulation)?;
        let table = data.table();
        let columns: Vec<&str> = table.column_names().collect();
        debug!(rows = table.rows(), width = table.width(), ?columns, "Output loaded.");
        plot::render(&data, &artifacts.plot_path)?;
        info!(path = %file_name(&artifacts.plot_path), "Plot saved.");

        Ok(artifacts)
    }

    fn resolve(&self, simulation_id: &str) -> Result<SimulationDescriptor> {
        let index = load_index(&self.index_path)?;
        debug!(index = %self.index_path.display(), simulations = index.len(), "Index loaded.");
        if index.is_empty() {
            warn!(index = %self.index_path.display(), "Index lists no simulations.");
        }
        match index.get_simulation(simulation_id) {
            Some(simulation) => Ok(simulation.clone()),
            None => {
                let available: Vec<&str> = index.iter().map(|s| s.id.as_str()).collect();
                error!(?available, "Simulation with provided id not found.");
                Err(Error::Lookup { simulation_id: simulation_id.to_string() })
            }
        }
    }

    fn execute(&self, simulation: &SimulationDescriptor) -> Result<RunArtifacts> {
        let start_ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let artifacts = RunArtifacts::new(&self.output_dir, &simulation.id, start_ts);
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::io(format!("failed to create output directory {}", self.output_dir.display()), e)
        })?;

        info!("Running simulation.");
        let started = Instant::now();
        process::run_simulation(simulation, &self.binary_path, &artifacts.log_path)?;

        let duration_seconds = (started.elapsed().as_secs_f64() * 100.0).round() / 100.0;
        info!(
            duration_seconds,
            log_file = %file_name(&artifacts.log_path),
            "Simulation finished."
        );
        Ok(artifacts)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
