//! Commit model for `git log`

/// One commit from `git log --format=%h|%H|%s|%an|%ar|%at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Abbreviated hash
    pub short_hash: String,
    /// Full 40-character hash
    pub hash: String,
    /// Subject line
    pub subject: String,
    pub author: String,
    /// Relative date as rendered by git (e.g., "2 hours ago")
    pub relative_date: String,
    /// Author timestamp in seconds since the Unix epoch
    pub timestamp: Option<i64>,
}
