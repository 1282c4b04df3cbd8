//! Repository identity supplied by the directory scanner

use std::fmt;
use std::path::PathBuf;

/// Stable identity of a working tree, independent of its path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoId(String);

impl RepoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RepoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RepoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A working tree known to the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: RepoId,
    /// Display name (usually the last path component)
    pub name: String,
    /// Working tree root
    pub path: PathBuf,
}

impl Repository {
    /// Create a repository whose name is derived from the path
    pub fn new(id: impl Into<RepoId>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            id: id.into(),
            name,
            path,
        }
    }
}
