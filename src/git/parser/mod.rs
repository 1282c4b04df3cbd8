//! git output parser
//!
//! Parses the output from git commands into structured data. Parsers never
//! fail on unexpected input: unknown lines are skipped and unknown codes get
//! a safe default, so odd tool output cannot take down a refresh.

mod branch;
mod log;
pub mod path;
mod pull;
mod status;

pub use branch::parse_branch_list;
pub use path::{decode_path, quote_path};
pub use pull::parse_pull_summary;


use regex::Regex;
use std::sync::LazyLock;

/// Regex for the fast-forward line of `git pull`
/// Example: `Updating a1b2c3d..e4f5a6b`
///
/// Groups:
/// 1. old commit
/// 2. new commit
static PULL_UPDATING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Updating ([0-9a-fA-F]+)\.\.([0-9a-fA-F]+)").expect("Invalid updating regex")
});

/// Regex for the diffstat summary line
/// Example: ` 3 files changed, 10 insertions(+), 2 deletions(-)`
///
/// Groups:
/// 1. changed file count
/// 2. insertions (optional)
/// 3. deletions (optional)
static PULL_SHORTSTAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+) files? changed(?:, (\d+) insertions?\(\+\))?(?:, (\d+) deletions?\(-\))?")
        .expect("Invalid shortstat regex")
});

/// Parser for git command output
pub struct Parser;
