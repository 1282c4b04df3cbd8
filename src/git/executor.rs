//! git command executor
//!
//! Builds one [`CommandSpec`] per operation, runs it through the
//! [`ProcessRunner`], classifies failures, and hands successful output to
//! the parsers. Every method takes the working tree it operates on, so one
//! executor serves any number of repositories from any number of threads.

use std::path::Path;

use super::GitError;
use super::classify::classify_failure;
use super::command::{CommandResult, CommandSpec};
use super::constants::{commands, flags};
use super::parser::{Parser, parse_branch_list, parse_pull_summary};
use super::runner::ProcessRunner;
use crate::config::GitConfig;
use crate::model::{Branch, ChangeKind, Commit, FileChange, PullSummary, RepositoryStatus};

/// Executor for git commands
#[derive(Debug, Clone, Default)]
pub struct GitExecutor {
    config: GitConfig,
    runner: ProcessRunner,
}

impl GitExecutor {
    pub fn new(config: GitConfig) -> Self {
        Self {
            config,
            runner: ProcessRunner::new(),
        }
    }

    pub fn config(&self) -> &GitConfig {
        &self.config
    }

    /// Describe a git invocation in `dir` with the classified deadline
    pub fn spec(&self, dir: &Path, args: &[&str]) -> CommandSpec {
        CommandSpec::new(&self.config.executable, args.iter().copied(), dir)
    }

    /// Run git and return the raw result, whatever the exit code
    pub fn run(&self, dir: &Path, args: &[&str]) -> Result<CommandResult, GitError> {
        self.runner.run(&self.spec(dir, args))
    }

    /// Run git and classify a non-zero exit; returns trimmed stdout
    pub fn execute(&self, dir: &Path, args: &[&str]) -> Result<String, GitError> {
        let result = self.run(dir, args)?;
        if result.succeeded() {
            Ok(result.stdout.trim().to_string())
        } else {
            Err(classify_failure(&result))
        }
    }

    // ── Queries ───────────────────────────────────────────────────────

    /// Run `git status --porcelain=v2 --branch` and parse it
    pub fn status(&self, dir: &Path) -> Result<RepositoryStatus, GitError> {
        let output = self.execute(
            dir,
            &[
                flags::CONFIG,
                flags::NO_QUOTEPATH,
                commands::STATUS,
                flags::PORCELAIN_V2,
                flags::BRANCH_HEADERS,
                flags::UNTRACKED_NORMAL,
            ],
        )?;
        Ok(Parser::parse_status(&output))
    }

    /// List local and remote-tracking branches
    pub fn branches(&self, dir: &Path) -> Result<Vec<Branch>, GitError> {
        let output = self.execute(
            dir,
            &[
                commands::BRANCH,
                "-a",
                "--format=%(refname:short)|%(upstream:short)|%(HEAD)",
            ],
        )?;
        Ok(parse_branch_list(&output))
    }

    /// Most recent `limit` commits reachable from HEAD
    pub fn log(&self, dir: &Path, limit: usize) -> Result<Vec<Commit>, GitError> {
        let limit = limit.to_string();
        let output = self.execute(
            dir,
            &[
                commands::LOG,
                "-n",
                &limit,
                "--format=%h|%H|%s|%an|%ar|%at",
            ],
        )?;
        Ok(Parser::parse_log(&output))
    }

    /// Upstream of the current branch, e.g. `origin/main`
    pub fn current_upstream(&self, dir: &Path) -> Result<String, GitError> {
        match self.execute(
            dir,
            &[
                commands::REV_PARSE,
                "--abbrev-ref",
                "--symbolic-full-name",
                "@{upstream}",
            ],
        ) {
            Ok(upstream) if !upstream.is_empty() => Ok(upstream),
            Ok(_) | Err(GitError::CommandFailed(_)) => Err(GitError::NoUpstream),
            Err(e) => Err(e),
        }
    }

    /// Diff for one change record.
    ///
    /// Untracked files have no diff, so their contents are returned instead.
    pub fn diff(&self, dir: &Path, file: &FileChange) -> Result<String, GitError> {
        if file.staged {
            self.execute(
                dir,
                &[commands::DIFF, "--cached", flags::PATHSPEC_SEPARATOR, &file.path],
            )
        } else if file.kind == ChangeKind::Untracked {
            Ok(std::fs::read_to_string(dir.join(&file.path))?)
        } else {
            self.execute(dir, &[commands::DIFF, flags::PATHSPEC_SEPARATOR, &file.path])
        }
    }

    /// Contents of `path` as of HEAD
    pub fn show_file_at_head(&self, dir: &Path, path: &str) -> Result<String, GitError> {
        let object = format!("HEAD:{path}");
        self.execute(dir, &[commands::SHOW, &object])
    }

    // ── Branch operations ─────────────────────────────────────────────

    pub fn checkout(&self, dir: &Path, branch: &str) -> Result<(), GitError> {
        self.execute(dir, &[commands::CHECKOUT, branch])?;
        Ok(())
    }

    /// Create a branch at HEAD, optionally switching to it
    pub fn create_branch(&self, dir: &Path, name: &str, checkout: bool) -> Result<(), GitError> {
        if checkout {
            self.execute(dir, &[commands::CHECKOUT, "-b", name])?;
        } else {
            self.execute(dir, &[commands::BRANCH, name])?;
        }
        Ok(())
    }

    pub fn merge(&self, dir: &Path, branch: &str) -> Result<(), GitError> {
        self.execute(dir, &[commands::MERGE, branch])?;
        Ok(())
    }

    // ── Index operations ──────────────────────────────────────────────

    pub fn stage_all(&self, dir: &Path) -> Result<(), GitError> {
        self.execute(dir, &[commands::ADD, "-A"])?;
        Ok(())
    }

    /// Stage the given paths (including deletions); no-op for an empty list
    pub fn stage_files(&self, dir: &Path, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        let args = with_paths(&[commands::ADD, "-A", flags::PATHSPEC_SEPARATOR], paths);
        self.execute(dir, &args)?;
        Ok(())
    }

    /// Unstage everything.
    ///
    /// Names no commit so it also works before the first one.
    pub fn unstage_all(&self, dir: &Path) -> Result<(), GitError> {
        self.execute(dir, &[commands::RESET, "-q", flags::PATHSPEC_SEPARATOR, "."])?;
        Ok(())
    }

    pub fn unstage_files(&self, dir: &Path, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        let args = with_paths(&[commands::RESET, "-q", flags::PATHSPEC_SEPARATOR], paths);
        self.execute(dir, &args)?;
        Ok(())
    }

    /// Commit the index, or only `paths` when non-empty
    pub fn commit(&self, dir: &Path, message: &str, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            self.execute(dir, &[commands::COMMIT, "-m", message])?;
        } else {
            let args = with_paths(&[commands::COMMIT, "-m", message, flags::PATHSPEC_SEPARATOR], paths);
            self.execute(dir, &args)?;
        }
        Ok(())
    }

    /// Restore worktree copies of `paths` from HEAD
    pub fn discard_changes(&self, dir: &Path, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        let args = with_paths(
            &[commands::RESTORE, "--source=HEAD", "--worktree", flags::PATHSPEC_SEPARATOR],
            paths,
        );
        self.execute(dir, &args)?;
        Ok(())
    }

    // ── Remote operations ─────────────────────────────────────────────

    /// Run `git pull --stat` and summarize what it did
    pub fn pull(&self, dir: &Path) -> Result<PullSummary, GitError> {
        let result = self.run(
            dir,
            &[
                flags::CONFIG,
                flags::NO_QUOTEPATH,
                commands::PULL,
                flags::STAT,
                flags::NO_PROGRESS,
            ],
        )?;

        if !result.succeeded() {
            return Err(classify_failure(&result));
        }
        Ok(parse_pull_summary(&result.combined_output()))
    }

    pub fn push(&self, dir: &Path) -> Result<(), GitError> {
        self.execute(dir, &[commands::PUSH])?;
        Ok(())
    }

    /// Fetch all remotes
    pub fn fetch(&self, dir: &Path) -> Result<(), GitError> {
        self.execute(dir, &[commands::FETCH, "--all"])?;
        Ok(())
    }

    /// Make the working tree match the upstream exactly, discarding local
    /// commits, changes and untracked files.
    pub fn force_pull_overwriting_local(&self, dir: &Path) -> Result<(), GitError> {
        let upstream = self.current_upstream(dir)?;
        self.execute(dir, &[commands::FETCH, "--all", "--prune"])?;
        self.execute(dir, &[commands::RESET, "--hard", &upstream])?;
        self.execute(dir, &[commands::CLEAN, "-fd"])?;
        Ok(())
    }

    /// Force-push HEAD onto the upstream branch
    pub fn force_push_overwriting_remote(&self, dir: &Path) -> Result<(), GitError> {
        let upstream = self.current_upstream(dir)?;
        let (remote, branch) = upstream.split_once('/').ok_or(GitError::NoUpstream)?;
        let refspec = format!("HEAD:{branch}");
        self.execute(dir, &[commands::PUSH, "--force", remote, &refspec])?;
        Ok(())
    }

    // ── Free-form ─────────────────────────────────────────────────────

    /// Run a user-typed command line such as `git log --oneline -5`.
    ///
    /// The line is split on whitespace into an argument vector (no shell);
    /// a leading `git` is optional.
    pub fn run_raw(&self, dir: &Path, command_line: &str) -> Result<String, GitError> {
        let mut args: Vec<&str> = command_line.split_whitespace().collect();
        if args
            .first()
            .is_some_and(|first| first.eq_ignore_ascii_case("git"))
        {
            args.remove(0);
        }
        if args.is_empty() {
            return Err(GitError::EmptyCommand);
        }
        self.execute(dir, &args)
    }
}

/// Fixed arguments followed by caller-supplied paths
fn with_paths<'a>(fixed: &[&'a str], paths: &'a [String]) -> Vec<&'a str> {
    fixed
        .iter()
        .copied()
        .chain(paths.iter().map(String::as_str))
        .collect()
}
