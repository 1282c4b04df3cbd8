//! Command description, captured result, and verb classification

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::constants::{deadlines, flags};

/// One fully described invocation. Built per call, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: PathBuf,
    args: Vec<String>,
    working_dir: PathBuf,
    env: Vec<(String, String)>,
    deadline: Duration,
}

impl CommandSpec {
    /// Describe an invocation whose deadline is derived from its leading verb
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I, working_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let deadline = deadline_for(&args);
        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
            env: Vec::new(),
            deadline,
        }
    }

    /// Override the classified deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Add an environment override on top of the inherited environment
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Shell-quoted rendering of the whole command, for diagnostics only
    pub fn canonical(&self) -> String {
        render_command(&self.program.to_string_lossy(), &self.args)
    }
}

/// Captured output of a process that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `-1` when the process was ended by a signal
    pub exit_code: i32,
}

impl CommandResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// Non-blank stdout and stderr joined by a newline
    pub fn combined_output(&self) -> String {
        [self.stdout.trim(), self.stderr.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Coarse timeout class of a git verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineClass {
    /// Talks to a remote
    Network,
    /// Rewrites refs, the index, or the worktree
    LocalMutation,
    /// Read-only query
    Metadata,
    /// Any verb not listed in the tables
    Default,
}

impl DeadlineClass {
    pub fn of_verb(verb: &str) -> Self {
        if deadlines::NETWORK_VERBS.contains(&verb) {
            Self::Network
        } else if deadlines::LOCAL_MUTATION_VERBS.contains(&verb) {
            Self::LocalMutation
        } else if deadlines::METADATA_VERBS.contains(&verb) {
            Self::Metadata
        } else {
            Self::Default
        }
    }

    pub fn deadline(self) -> Duration {
        match self {
            Self::Network => deadlines::NETWORK,
            Self::LocalMutation => deadlines::LOCAL_MUTATION,
            Self::Metadata => deadlines::METADATA,
            Self::Default => deadlines::DEFAULT,
        }
    }
}

/// First argument that is the subcommand, skipping global options.
///
/// `-c <kv>` and `-C <dir>` consume the following argument.
pub fn leading_verb(args: &[String]) -> Option<&str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == flags::CONFIG || arg == flags::CHDIR {
            iter.next();
        } else if !arg.starts_with('-') {
            return Some(arg);
        }
    }
    None
}

/// Default deadline for an argument vector
pub fn deadline_for(args: &[String]) -> Duration {
    leading_verb(args)
        .map(DeadlineClass::of_verb)
        .unwrap_or(DeadlineClass::Default)
        .deadline()
}

/// Render a program and its arguments as a POSIX-shell-quoted line
pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(shell_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || "_-./:=@,+%^".contains(c);

    if arg.is_empty() {
        "''".to_string()
    } else if arg.chars().all(is_safe) {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
