//! Per-repository operation coordination
//!
//! Guarantees at most one in-flight operation per repository identity,
//! fans refreshes out across repositories on scoped threads, and keeps the
//! latest published state of every repository for the presentation layer.
//!
//! A request against a busy repository is rejected with
//! [`CoordinatorError::Busy`], never queued.

mod backend;
mod in_flight;

pub use backend::GitBackend;
pub use in_flight::InFlightSet;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::git::GitError;
use crate::model::{ChangeKind, PullSummary, RepoId, Repository, RepositoryStatus};

/// Errors surfaced by coordinated operations
#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("Repository {0} is busy; retry later")]
    Busy(RepoId),

    #[error("Unknown repository {0}")]
    UnknownRepository(RepoId),

    #[error("Worker for repository {0} panicked")]
    WorkerPanicked(RepoId),

    #[error(transparent)]
    Git(#[from] GitError),
}

/// Latest published state of one repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSnapshot {
    /// Last successfully read status; kept when a later refresh fails
    pub status: Option<Arc<RepositoryStatus>>,
    /// Human-readable error of the last failed operation, cleared on success
    pub last_error: Option<String>,
    pub is_busy: bool,
    /// Summary of the last successful pull
    pub last_pull: Option<PullSummary>,
}

/// Receives every change to a repository's snapshot.
///
/// Updates for different repositories arrive in no particular order.
pub trait StatusObserver: Send + Sync {
    fn on_update(&self, id: &RepoId, snapshot: &RepoSnapshot);
}

impl<F> StatusObserver for F
where
    F: Fn(&RepoId, &RepoSnapshot) + Send + Sync,
{
    fn on_update(&self, id: &RepoId, snapshot: &RepoSnapshot) {
        self(id, snapshot)
    }
}

/// Observer that ignores all updates
#[derive(Debug, Default)]
pub struct NoopObserver;

impl StatusObserver for NoopObserver {
    fn on_update(&self, _id: &RepoId, _snapshot: &RepoSnapshot) {}
}

/// Outcome of one repository in a bulk refresh
#[derive(Debug)]
pub struct RefreshOutcome {
    pub id: RepoId,
    pub result: Result<Arc<RepositoryStatus>, CoordinatorError>,
}

/// Coordinates operations across many repositories
pub struct Coordinator<B> {
    backend: B,
    registry: Mutex<HashMap<RepoId, Repository>>,
    in_flight: InFlightSet,
    snapshots: Mutex<HashMap<RepoId, RepoSnapshot>>,
    observer: Arc<dyn StatusObserver>,
}

impl<B: GitBackend> Coordinator<B> {
    pub fn new(backend: B) -> Self {
        Self::with_observer(backend, Arc::new(NoopObserver))
    }

    pub fn with_observer(backend: B, observer: Arc<dyn StatusObserver>) -> Self {
        Self {
            backend,
            registry: Mutex::new(HashMap::new()),
            in_flight: InFlightSet::new(),
            snapshots: Mutex::new(HashMap::new()),
            observer,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ── Registry ──────────────────────────────────────────────────────

    /// Add or replace repositories reported by the directory scanner
    pub fn register(&self, repositories: impl IntoIterator<Item = Repository>) {
        let mut registry = lock(&self.registry);
        for repo in repositories {
            registry.insert(repo.id.clone(), repo);
        }
    }

    /// Forget a repository and its published state
    pub fn unregister(&self, id: &RepoId) {
        lock(&self.registry).remove(id);
        lock(&self.snapshots).remove(id);
    }

    /// Registered identities, sorted
    pub fn repository_ids(&self) -> Vec<RepoId> {
        let mut ids: Vec<RepoId> = lock(&self.registry).keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn repository(&self, id: &RepoId) -> Option<Repository> {
        lock(&self.registry).get(id).cloned()
    }

    pub fn snapshot(&self, id: &RepoId) -> Option<RepoSnapshot> {
        lock(&self.snapshots).get(id).cloned()
    }

    pub fn is_busy(&self, id: &RepoId) -> bool {
        self.in_flight.contains(id)
    }

    // ── Guarded execution ─────────────────────────────────────────────

    /// Run `op` while holding the repository's in-flight slot.
    ///
    /// Fails immediately with `Busy` if another operation holds the slot.
    /// The slot is released when `op` returns or unwinds.
    pub fn run_exclusive<T>(
        &self,
        id: &RepoId,
        op: impl FnOnce() -> T,
    ) -> Result<T, CoordinatorError> {
        if !self.in_flight.try_insert(id) {
            debug!(repo = %id, "rejected: operation already in flight");
            return Err(CoordinatorError::Busy(id.clone()));
        }

        let _release = scopeguard::guard((), |_| {
            self.in_flight.remove(id);
            self.publish(id, |snapshot| snapshot.is_busy = false);
        });
        self.publish(id, |snapshot| snapshot.is_busy = true);

        Ok(op())
    }

    // ── Operations ────────────────────────────────────────────────────

    /// Re-read one repository's status and publish it
    pub fn refresh(&self, id: &RepoId) -> Result<Arc<RepositoryStatus>, CoordinatorError> {
        let repo = self.lookup(id)?;
        self.run_exclusive(id, || self.refresh_locked(&repo))?
    }

    /// Refresh many repositories concurrently, one thread each.
    ///
    /// Waits for all of them; a failure is attached to its own outcome and
    /// does not affect siblings. Outcomes are returned in input order.
    pub fn refresh_all(&self, ids: &[RepoId]) -> Vec<RefreshOutcome> {
        let outcomes: Vec<RefreshOutcome> = thread::scope(|scope| {
            let handles: Vec<_> = ids
                .iter()
                .map(|id| (id, scope.spawn(move || self.refresh(id))))
                .collect();

            handles
                .into_iter()
                .map(|(id, handle)| RefreshOutcome {
                    id: id.clone(),
                    result: handle
                        .join()
                        .unwrap_or_else(|_| Err(CoordinatorError::WorkerPanicked(id.clone()))),
                })
                .collect()
        });

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(total = outcomes.len(), failed, "bulk refresh finished");
        outcomes
    }

    /// Refresh every registered repository
    pub fn refresh_registered(&self) -> Vec<RefreshOutcome> {
        self.refresh_all(&self.repository_ids())
    }

    /// Pull, then refresh status inside the same guard
    pub fn pull(&self, id: &RepoId) -> Result<PullSummary, CoordinatorError> {
        let repo = self.lookup(id)?;
        self.run_exclusive(id, || {
            let summary = self
                .backend
                .pull(&repo.path)
                .map_err(|e| self.record_failure(id, e))?;

            self.publish(id, |snapshot| snapshot.last_pull = Some(summary.clone()));
            if let Err(e) = self.refresh_locked(&repo) {
                debug!(repo = %id, error = %e, "status refresh after pull failed");
            }
            Ok(summary)
        })?
    }

    /// Commit every unstaged, non-conflicted modification and push it.
    ///
    /// Returns how many files were committed; `0` when there was nothing to
    /// commit (no commit or push is attempted then).
    pub fn quick_commit_and_push(
        &self,
        id: &RepoId,
        message: &str,
    ) -> Result<usize, CoordinatorError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(GitError::CommandFailed("commit message cannot be empty".to_string()).into());
        }
        let repo = self.lookup(id)?;

        self.run_exclusive(id, || {
            let status = self
                .backend
                .status(&repo.path)
                .map_err(|e| self.record_failure(id, e))?;

            let paths: Vec<String> = status
                .modified_files
                .iter()
                .filter(|f| f.kind != ChangeKind::Conflicted)
                .map(|f| f.path.clone())
                .collect();

            if paths.is_empty() {
                self.publish_status(id, Arc::new(status));
                return Ok(0);
            }

            let dir = repo.path.as_path();
            self.backend
                .unstage_all(dir)
                .and_then(|()| self.backend.stage_files(dir, &paths))
                .and_then(|()| self.backend.commit(dir, message))
                .and_then(|()| self.backend.push(dir))
                .map_err(|e| self.record_failure(id, e))?;

            info!(repo = %id, files = paths.len(), "committed and pushed");
            self.refresh_locked(&repo)?;
            Ok(paths.len())
        })?
    }

    // ── Internals ─────────────────────────────────────────────────────

    fn lookup(&self, id: &RepoId) -> Result<Repository, CoordinatorError> {
        self.repository(id)
            .ok_or_else(|| CoordinatorError::UnknownRepository(id.clone()))
    }

    /// Status query for a repository whose slot the caller already holds
    fn refresh_locked(&self, repo: &Repository) -> Result<Arc<RepositoryStatus>, CoordinatorError> {
        match self.backend.status(&repo.path) {
            Ok(status) => {
                let status = Arc::new(status);
                self.publish_status(&repo.id, Arc::clone(&status));
                Ok(status)
            }
            Err(e) => Err(self.record_failure(&repo.id, e)),
        }
    }

    fn publish_status(&self, id: &RepoId, status: Arc<RepositoryStatus>) {
        self.publish(id, |snapshot| {
            snapshot.status = Some(status);
            snapshot.last_error = None;
        });
    }

    /// Attach the error to the repository's snapshot, keeping its last status
    fn record_failure(&self, id: &RepoId, error: GitError) -> CoordinatorError {
        warn!(repo = %id, error = %error, "operation failed");
        let message = error.to_string();
        self.publish(id, |snapshot| snapshot.last_error = Some(message));
        CoordinatorError::Git(error)
    }

    /// Apply `update` to the snapshot, then notify outside the lock
    fn publish(&self, id: &RepoId, update: impl FnOnce(&mut RepoSnapshot)) {
        let snapshot = {
            let mut snapshots = lock(&self.snapshots);
            let entry = snapshots.entry(id.clone()).or_default();
            update(entry);
            entry.clone()
        };
        self.observer.on_update(id, &snapshot);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
