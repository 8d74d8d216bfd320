use std::path::PathBuf;

use thiserror::Error;

use crate::models::ProblemId;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Problem number {0} is out of range [1, 9999]")]
    InvalidProblemNumber(u32),

    #[error("Problem {0} not found")]
    ProblemNotFound(ProblemId),

    #[error("Problem {id} already exists at: {}", .path.display())]
    ProblemExists { id: ProblemId, path: PathBuf },

    #[error("{compiler} exited with code {}", .code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    CompilerFailed { compiler: String, code: Option<i32> },

    #[error("Problem {0} has not been built")]
    NotBuilt(ProblemId),

    #[error("Found {count} executables for problem {id}, expected exactly one")]
    AmbiguousArtifact { id: ProblemId, count: usize },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid build directory: {}", .0.display())]
    InvalidBuildDirectory(PathBuf),

    #[error("Interrupted by user")]
    Interrupted,

    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
