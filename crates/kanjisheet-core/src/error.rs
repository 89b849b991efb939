use std::path::PathBuf;

use kanjisheet_config::ConfigError;

use crate::reader::ReadError;
use crate::state::RunStage;
use crate::writer::WriteError;

/// Errors that end a run. Per-record lookup failures never show up here.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("No input file given")]
    MissingArgument,

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: WriteError,
    },

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl RunError {
    /// Stage the run was in when it aborted
    pub fn stage(&self) -> RunStage {
        match self {
            RunError::MissingArgument | RunError::Config(_) => RunStage::Start,
            RunError::Read { .. } => RunStage::Reading,
            RunError::Write { .. } => RunStage::Writing,
            RunError::Task(_) => RunStage::Aborted,
        }
    }
}
