//! External simulation binary invocation.

use std::{
    fs::File,
    path::Path,
    process::{Command, Stdio},
};

use crate::error::{Error, ProcessError, Result};
use crate::index::SimulationDescriptor;

/// Run `<binary_path> run --target <entrypoint>`, sending its stdout to `output_path`.
///
/// Blocks until the child exits; stderr stays attached to ours. On a non-zero
/// exit the log file keeps whatever the child wrote before failing.
pub fn run_simulation(
    simulation: &SimulationDescriptor,
    binary_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let binary = binary_path.display().to_string();
    let status = {
        let log_file = File::create(output_path).map_err(|e| {
            Error::io(format!("failed to create log file {}", output_path.display()), e)
        })?;

        Command::new(binary_path)
            .args(["run", "--target", simulation.entrypoint.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::from(log_file))
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ProcessError::Spawn { binary: binary.clone(), source })?
    };

    if !status.success() {
        return Err(ProcessError::Failed {
            binary,
            status,
            log_path: output_path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}
