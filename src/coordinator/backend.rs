//! Seam between the coordinator and the git layer

use std::path::Path;

use crate::git::{GitError, GitExecutor};
use crate::model::{PullSummary, RepositoryStatus};

/// Operations the coordinator needs from a version-control backend
pub trait GitBackend: Send + Sync {
    fn status(&self, dir: &Path) -> Result<RepositoryStatus, GitError>;

    fn pull(&self, dir: &Path) -> Result<PullSummary, GitError>;

    fn unstage_all(&self, dir: &Path) -> Result<(), GitError>;

    fn stage_files(&self, dir: &Path, paths: &[String]) -> Result<(), GitError>;

    /// Commit whatever is staged
    fn commit(&self, dir: &Path, message: &str) -> Result<(), GitError>;

    fn push(&self, dir: &Path) -> Result<(), GitError>;
}

impl GitBackend for GitExecutor {
    fn status(&self, dir: &Path) -> Result<RepositoryStatus, GitError> {
        GitExecutor::status(self, dir)
    }

    fn pull(&self, dir: &Path) -> Result<PullSummary, GitError> {
        GitExecutor::pull(self, dir)
    }

    fn unstage_all(&self, dir: &Path) -> Result<(), GitError> {
        GitExecutor::unstage_all(self, dir)
    }

    fn stage_files(&self, dir: &Path, paths: &[String]) -> Result<(), GitError> {
        GitExecutor::stage_files(self, dir, paths)
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<(), GitError> {
        GitExecutor::commit(self, dir, message, &[])
    }

    fn push(&self, dir: &Path) -> Result<(), GitError> {
        GitExecutor::push(self, dir)
    }
}
