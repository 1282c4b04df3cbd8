//! git command execution layer
//!
//! This module handles running git as a deadline-bounded subprocess,
//! classifying its failures, and parsing its output.

pub mod classify;
pub mod command;
pub mod constants;
mod executor;
/// Parser module (public for integration testing)
pub mod parser;
mod runner;

pub use classify::classify_failure;
pub use command::{CommandResult, CommandSpec, DeadlineClass};
pub use executor::GitExecutor;
pub use runner::ProcessRunner;

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when executing git commands
#[derive(Error, Debug)]
pub enum GitError {
    #[error("`{command}` timed out after {deadline:?} in {}", .working_dir.display())]
    Timeout {
        command: String,
        deadline: Duration,
        working_dir: PathBuf,
    },

    #[error("failed to start `{command}`: {source}")]
    SpawnFailure {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Not a git repository")]
    NotARepository,

    #[error("Merge conflict; resolve it first")]
    MergeConflict,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("git command failed: {0}")]
    CommandFailed(String),

    #[error("Current branch has no upstream")]
    NoUpstream,

    #[error("Command cannot be empty")]
    EmptyCommand,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
