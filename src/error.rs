//! Error taxonomy shared by every stage of a run.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Index file missing, malformed or violating field constraints.
    #[error("invalid simulation index {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("simulation '{simulation_id}' not found")]
    Lookup { simulation_id: String },

    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Output file missing or not matching the expected column layout.
    #[error("invalid simulation output {}: {message}", path.display())]
    Data { path: PathBuf, message: String },

    #[error("failed to render plot {}: {message}", path.display())]
    Render { path: PathBuf, message: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} exited with {status} (partial output kept in {})", log_path.display())]
    Failed {
        binary: String,
        status: ExitStatus,
        log_path: PathBuf,
    },
}

impl Error {
    pub(crate) fn config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Config { path: path.into(), message: message.to_string() }
    }

    pub(crate) fn data(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Data { path: path.into(), message: message.to_string() }
    }

    pub(crate) fn render(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Render { path: path.into(), message: message.to_string() }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
}
