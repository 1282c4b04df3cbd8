//! RemoteRepo helper for git remote testing.
//!
//! Provides a bare git repository to simulate a remote server.

use std::process::Command;
use tempfile::TempDir;

use super::TestRepo;

/// A bare git repository for use as a remote in tests.
///
/// The repository is automatically cleaned up when the RemoteRepo is dropped.
pub struct RemoteRepo {
    dir: TempDir,
}

impl RemoteRepo {
    /// Create a new bare git repository whose default branch is `main`.
    pub fn new_bare() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");

        let output = Command::new("git")
            .args(["init", "-q", "--bare", "-b", "main"])
            .current_dir(dir.path())
            .output()
            .expect("Failed to execute git init --bare");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("git init --bare failed: {}", stderr);
        }

        Self { dir }
    }

    /// Get the URL (path) of this remote repository.
    pub fn url(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }
}

impl TestRepo {
    /// Create a repository with one commit on `main`, pushed to `remote` as
    /// its upstream.
    pub fn with_remote(remote: &RemoteRepo) -> Self {
        let repo = Self::new();
        repo.add_remote("origin", &remote.url());
        repo.commit_file("README.md", "hello\n", "initial");
        repo.git(&["push", "-q", "-u", "origin", "main"]);
        repo
    }
}
