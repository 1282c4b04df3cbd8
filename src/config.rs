//! Process-wide configuration
//!
//! Resolved once at startup and never mutated afterwards. The deadline
//! table is compiled in (see [`crate::git::constants::deadlines`]).

use std::path::PathBuf;

use crate::git::constants::GIT_COMMAND;

/// Where to find the git executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitConfig {
    /// Path to git; a bare name is resolved through `PATH`
    pub executable: PathBuf,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(GIT_COMMAND),
        }
    }
}

impl GitConfig {
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}
