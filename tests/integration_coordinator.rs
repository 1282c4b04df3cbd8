//! Coordinator integration tests against real repositories.

#[path = "common/mod.rs"]
mod common;

use std::sync::{Arc, Mutex};

use common::{RemoteRepo, TestRepo};
use gitfleet::coordinator::{Coordinator, CoordinatorError, RepoSnapshot};
use gitfleet::git::{GitError, GitExecutor};
use gitfleet::model::{RepoId, Repository};
use tempfile::TempDir;

#[test]
fn test_refresh_all_mixed_repositories() {
    skip_if_no_git!();
    let clean = TestRepo::new();
    clean.commit_file("a.txt", "1\n", "initial");
    let dirty = TestRepo::new();
    dirty.commit_file("a.txt", "1\n", "initial");
    dirty.write_file("a.txt", "2\n");
    let not_a_repo = TempDir::new().unwrap();

    let coordinator = Coordinator::new(GitExecutor::default());
    coordinator.register([
        Repository::new("clean", clean.path()),
        Repository::new("dirty", dirty.path()),
        Repository::new("plain", not_a_repo.path()),
    ]);
    let ids = ["dirty", "plain", "clean"].map(RepoId::from);

    let outcomes = coordinator.refresh_all(&ids);

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].id.as_str(), "dirty");
    assert_eq!(outcomes[0].result.as_ref().unwrap().modified_files.len(), 1);
    assert!(matches!(
        outcomes[1].result,
        Err(CoordinatorError::Git(GitError::NotARepository))
    ));
    assert!(!outcomes[2].result.as_ref().unwrap().has_changes());

    let plain = coordinator.snapshot(&RepoId::from("plain")).unwrap();
    assert!(plain.status.is_none());
    assert!(plain.last_error.is_some());
    for id in &ids {
        assert!(!coordinator.is_busy(id));
    }
}

#[test]
fn test_refresh_many_repositories_concurrently() {
    skip_if_no_git!();
    let repos: Vec<TestRepo> = (0..8)
        .map(|i| {
            let repo = TestRepo::new();
            repo.commit_file("a.txt", "1\n", "initial");
            for n in 0..i {
                repo.write_file(&format!("untracked-{n}.txt"), "x");
            }
            repo
        })
        .collect();

    let coordinator = Coordinator::new(GitExecutor::default());
    coordinator.register(
        repos
            .iter()
            .enumerate()
            .map(|(i, repo)| Repository::new(format!("repo-{i}"), repo.path())),
    );

    let outcomes = coordinator.refresh_registered();

    assert_eq!(outcomes.len(), 8);
    for outcome in outcomes {
        let i: usize = outcome.id.as_str().trim_start_matches("repo-").parse().unwrap();
        let status = outcome.result.unwrap();
        assert_eq!(status.untracked_files.len(), i);
    }
}

#[test]
fn test_pull_through_coordinator() {
    skip_if_no_git!();
    let remote = RemoteRepo::new_bare();
    let local = TestRepo::with_remote(&remote);
    let other = TestRepo::clone_from(&remote.url());
    other.commit_file("new.txt", "1\n2\n", "add file");
    other.git(&["push", "-q"]);

    let updates: Arc<Mutex<Vec<RepoSnapshot>>> = Arc::default();
    let sink = Arc::clone(&updates);
    let coordinator = Coordinator::with_observer(
        GitExecutor::default(),
        Arc::new(move |_: &RepoId, snapshot: &RepoSnapshot| {
            sink.lock().unwrap().push(snapshot.clone());
        }),
    );
    coordinator.register([Repository::new("local", local.path())]);
    let id = RepoId::from("local");

    let summary = coordinator.pull(&id).unwrap();

    assert_eq!(summary.changed_files, Some(1));
    assert_eq!(summary.insertions, Some(2));
    let snapshot = coordinator.snapshot(&id).unwrap();
    assert_eq!(snapshot.last_pull, Some(summary));
    assert_eq!(snapshot.status.unwrap().behind, 0);

    let updates = updates.lock().unwrap();
    assert!(updates.first().unwrap().is_busy);
    assert!(!updates.last().unwrap().is_busy);
}

#[test]
fn test_quick_commit_and_push() {
    skip_if_no_git!();
    let remote = RemoteRepo::new_bare();
    let local = TestRepo::with_remote(&remote);
    local.write_file("README.md", "changed\n");
    local.write_file("untracked.txt", "left alone\n");

    let coordinator = Coordinator::new(GitExecutor::default());
    coordinator.register([Repository::new("local", local.path())]);
    let id = RepoId::from("local");

    let committed = coordinator.quick_commit_and_push(&id, "quick fix").unwrap();

    assert_eq!(committed, 1);
    let status = coordinator.snapshot(&id).unwrap().status.unwrap();
    assert!(status.modified_files.is_empty());
    assert_eq!(status.untracked_files.len(), 1);
    assert_eq!(status.ahead, 0);

    let subject = local.git(&["log", "-1", "--format=%s", "origin/main"]);
    assert_eq!(subject.trim(), "quick fix");
}

#[test]
fn test_quick_commit_nothing_to_commit() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "1\n", "initial");
    let head = repo.head();

    let coordinator = Coordinator::new(GitExecutor::default());
    coordinator.register([Repository::new("r", repo.path())]);

    assert_eq!(
        coordinator
            .quick_commit_and_push(&RepoId::from("r"), "noop")
            .unwrap(),
        0
    );
    assert_eq!(repo.head(), head);
}
