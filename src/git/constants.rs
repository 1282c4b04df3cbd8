//! git-specific constants
//!
//! Centralized definitions for git command names, flags, environment and
//! timing values.

use std::time::Duration;

/// git command binary name (resolved through PATH)
pub const GIT_COMMAND: &str = "git";

/// git subcommands
pub mod commands {
    pub const STATUS: &str = "status";
    pub const BRANCH: &str = "branch";
    pub const LOG: &str = "log";
    pub const CHECKOUT: &str = "checkout";
    pub const MERGE: &str = "merge";
    pub const ADD: &str = "add";
    pub const RESET: &str = "reset";
    pub const COMMIT: &str = "commit";
    pub const PULL: &str = "pull";
    pub const PUSH: &str = "push";
    pub const FETCH: &str = "fetch";
    pub const CLEAN: &str = "clean";
    pub const REV_PARSE: &str = "rev-parse";
    pub const DIFF: &str = "diff";
    pub const RESTORE: &str = "restore";
    pub const SHOW: &str = "show";
}

/// git command flags
pub mod flags {
    /// Global config override (`-c key=value`)
    pub const CONFIG: &str = "-c";
    /// Global working-directory override (`-C path`)
    pub const CHDIR: &str = "-C";
    /// Keep non-ASCII bytes unescaped in paths
    pub const NO_QUOTEPATH: &str = "core.quotepath=false";
    pub const PORCELAIN_V2: &str = "--porcelain=v2";
    pub const BRANCH_HEADERS: &str = "--branch";
    /// `normal` collapses untracked directories to `dir/`, much cheaper than `all`
    pub const UNTRACKED_NORMAL: &str = "--untracked-files=normal";
    pub const STAT: &str = "--stat";
    pub const NO_PROGRESS: &str = "--no-progress";
    pub const PATHSPEC_SEPARATOR: &str = "--";
}

/// Header markers in `status --porcelain=v2 --branch` output
pub mod headers {
    pub const BRANCH_OID: &str = "# branch.oid ";
    pub const BRANCH_HEAD: &str = "# branch.head ";
    pub const BRANCH_UPSTREAM: &str = "# branch.upstream ";
    pub const BRANCH_AB: &str = "# branch.ab ";
    /// `branch.head` value for a detached HEAD
    pub const DETACHED: &str = "(detached)";
    /// `branch.oid` value for a repository without commits
    pub const INITIAL: &str = "(initial)";
    /// Label used when no better branch name can be derived
    pub const HEAD_SENTINEL: &str = "HEAD";
    /// Length of abbreviated object ids in synthesized labels
    pub const SHORT_OID_LEN: usize = 7;
}

/// Environment forced onto every child process.
///
/// A fixed English locale keeps the stderr heuristics stable; the prompt
/// switches make credential helpers fail instead of waiting on a terminal.
pub const FORCED_ENV: &[(&str, &str)] = &[
    ("LC_ALL", "C"),
    ("LANG", "C"),
    ("LANGUAGE", "C"),
    ("GIT_TERMINAL_PROMPT", "0"),
    ("GCM_INTERACTIVE", "never"),
];

/// Error detection patterns in lower-cased stderr
pub mod errors {
    pub const NOT_A_REPO: &str = "not a git repository";
    pub const CONFLICT: &str = "conflict";
    pub const MERGE: &str = "merge";
    pub const UNRESOLVED_HOST: &str = "could not resolve host";
    pub const NETWORK: &str = "network";
}

/// Sentinel lines in pull output
pub mod pull {
    pub const ALREADY_UP_TO_DATE: &str = "Already up to date.";
}

/// Deadline classes by leading verb
pub mod deadlines {
    use std::time::Duration;

    /// Verbs that talk to a remote
    pub const NETWORK_VERBS: &[&str] = &["clone", "fetch", "pull", "push", "ls-remote"];
    pub const NETWORK: Duration = Duration::from_secs(90);

    /// Local verbs that rewrite refs, the index, or the worktree
    pub const LOCAL_MUTATION_VERBS: &[&str] = &[
        "reset",
        "clean",
        "merge",
        "rebase",
        "cherry-pick",
        "revert",
        "checkout",
        "switch",
        "stash",
        "commit",
        "restore",
    ];
    pub const LOCAL_MUTATION: Duration = Duration::from_secs(30);

    /// Read-only metadata queries
    pub const METADATA_VERBS: &[&str] = &[
        "status",
        "rev-parse",
        "branch",
        "log",
        "show",
        "diff",
        "config",
        "remote",
        "symbolic-ref",
        "ls-files",
        "for-each-ref",
        "describe",
        "tag",
    ];
    pub const METADATA: Duration = Duration::from_secs(10);

    /// Anything not listed above
    pub const DEFAULT: Duration = Duration::from_secs(15);
}

/// How often the runner checks child liveness and the deadline
pub const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Wait for output readers after a normal exit
pub const OUTPUT_FLUSH_GRACE: Duration = Duration::from_millis(100);

/// Wait for output readers after a forced kill
pub const KILL_DRAIN_GRACE: Duration = Duration::from_millis(25);
