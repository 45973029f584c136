use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "simrun", about = "Run a simulation, capture its output and plot the result", version)]
pub struct Cli {
    /// Identifier of the simulation to run, as listed in the index.
    #[arg(long = "simulation_id", value_name = "ID")]
    pub simulation_id: String,

    /// Simulation binary invoked as `<binary> run --target <entrypoint>` (default: fpm).
    #[arg(long = "fpm-binary-path", value_name = "PATH")]
    pub fpm_binary_path: Option<PathBuf>,

    /// Directory receiving the captured log and the plot (default: output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Simulation index file (default: index.json).
    #[arg(long = "index", value_name = "PATH")]
    pub index: Option<PathBuf>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
