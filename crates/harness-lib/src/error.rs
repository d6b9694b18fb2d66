//! Error types for the deployment harness
//!
//! The taxonomy mirrors how failures propagate: environment errors and
//! setup-path filesystem errors are fatal for the run, while cache pruning
//! during teardown is best-effort and handled by callers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the harness library
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The container runtime is missing or not responding
    #[error("container runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    /// The compose descriptor the harness operates on does not exist
    #[error("compose descriptor not found at {0}")]
    ComposeFileMissing(PathBuf),

    /// A runtime subprocess could not be spawned
    #[error("failed to spawn `{program}`: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A runtime subprocess ran but exited unsuccessfully
    #[error("`{program}` exited with status {code}")]
    CommandFailed { program: String, code: i32 },

    /// A filesystem operation failed while seeding configuration
    #[error("seeding failed at {path}: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Refused to delete a path resolving to a filesystem root or empty path
    #[error("refusing to delete unsafe path {0:?}")]
    UnsafeDeleteTarget(PathBuf),

    /// The credential env file contains a line that is not KEY=VALUE
    #[error("invalid env file at line {line}: {reason}")]
    EnvFile { line: usize, reason: String },

    /// The runtime's status output could not be parsed
    #[error("could not parse service status output: {0}")]
    StatusParse(#[from] serde_json::Error),

    /// Any other filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
