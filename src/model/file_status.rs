//! Working-tree status data model

/// Snapshot of a repository's working tree, built from one status query.
///
/// Never patched in place: each refresh produces a new value that replaces
/// the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepositoryStatus {
    /// Current branch name, or a synthesized label (`detached@<oid>`, `HEAD`)
    pub current_branch: String,

    /// Tracked upstream (e.g. `origin/main`), if one is configured
    pub upstream: Option<String>,

    /// Commits on the local branch that the upstream does not have
    pub ahead: u32,

    /// Commits on the upstream that the local branch does not have
    pub behind: u32,

    /// Index-side changes
    pub staged_files: Vec<FileChange>,

    /// Worktree-side changes to tracked files
    pub modified_files: Vec<FileChange>,

    /// Files unknown to the index
    pub untracked_files: Vec<FileChange>,

    /// Unmerged paths
    pub conflicted_files: Vec<FileChange>,
}

impl RepositoryStatus {
    /// Bucket a flat list of change records into a status.
    ///
    /// A path may land in both `staged_files` and `modified_files` when the
    /// index and worktree differ; conflicted records also appear in
    /// `modified_files`.
    pub fn from_records(
        current_branch: String,
        upstream: Option<String>,
        ahead: u32,
        behind: u32,
        records: Vec<FileChange>,
    ) -> Self {
        let mut status = Self {
            current_branch,
            upstream,
            ahead,
            behind,
            ..Self::default()
        };

        for record in records {
            if record.kind == ChangeKind::Conflicted {
                status.conflicted_files.push(record.clone());
            }

            if record.staged {
                status.staged_files.push(record);
            } else if record.kind == ChangeKind::Untracked {
                status.untracked_files.push(record);
            } else {
                status.modified_files.push(record);
            }
        }

        status
    }

    /// Staged + modified + untracked.
    ///
    /// Conflicted files are already counted through `modified_files`.
    pub fn total_changed_count(&self) -> usize {
        self.staged_files.len() + self.modified_files.len() + self.untracked_files.len()
    }

    /// Check if the working tree has any change at all
    pub fn has_changes(&self) -> bool {
        self.total_changed_count() > 0
    }

    /// Check if there are local commits not yet on the upstream
    pub fn has_unpushed_commits(&self) -> bool {
        self.ahead > 0
    }

    /// Check if there are unresolved conflicts
    pub fn has_conflicts(&self) -> bool {
        !self.conflicted_files.is_empty()
    }
}

/// One change record for one side (index or worktree) of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Decoded path, relative to the repository root
    pub path: String,

    /// Kind of change
    pub kind: ChangeKind,

    /// `true` for the index side, `false` for the worktree side
    pub staged: bool,
}

impl FileChange {
    pub fn new(path: impl Into<String>, kind: ChangeKind, staged: bool) -> Self {
        Self {
            path: path.into(),
            kind,
            staged,
        }
    }

    /// Rename source, when the tool reported one
    pub fn prior_path(&self) -> Option<&str> {
        match &self.kind {
            ChangeKind::Renamed { from } => from.as_deref(),
            _ => None,
        }
    }

    /// Final path component
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Parent directory, or an empty string for top-level files
    pub fn directory(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or_default()
    }

    /// Get the status indicator character
    pub fn indicator(&self) -> char {
        self.kind.indicator()
    }
}

/// Possible kinds of change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    Modified,
    Added,
    Deleted,

    /// File was renamed
    Renamed {
        /// Original path, when reported
        from: Option<String>,
    },

    Copied,
    Untracked,
    Ignored,
    Conflicted,
}

impl ChangeKind {
    /// Map a porcelain status character to a change kind.
    ///
    /// Unknown characters fall back to `Modified`.
    pub fn from_code(code: char) -> Self {
        match code {
            'M' => Self::Modified,
            'A' => Self::Added,
            'D' => Self::Deleted,
            'R' => Self::Renamed { from: None },
            'C' => Self::Copied,
            '?' => Self::Untracked,
            '!' => Self::Ignored,
            'U' => Self::Conflicted,
            _ => Self::Modified,
        }
    }

    pub fn indicator(&self) -> char {
        match self {
            Self::Modified => 'M',
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Renamed { .. } => 'R',
            Self::Copied => 'C',
            Self::Untracked => '?',
            Self::Ignored => '!',
            Self::Conflicted => 'U',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(path: &str, kind: ChangeKind, staged: bool) -> FileChange {
        FileChange::new(path, kind, staged)
    }

    #[test]
    fn test_from_records_buckets() {
        let status = RepositoryStatus::from_records(
            "main".to_string(),
            None,
            0,
            0,
            vec![
                change("a.rs", ChangeKind::Modified, true),
                change("a.rs", ChangeKind::Modified, false),
                change("new.rs", ChangeKind::Untracked, false),
                change("both.rs", ChangeKind::Conflicted, false),
            ],
        );

        assert_eq!(status.staged_files.len(), 1);
        assert_eq!(status.modified_files.len(), 2);
        assert_eq!(status.untracked_files.len(), 1);
        assert_eq!(status.conflicted_files.len(), 1);
        assert_eq!(status.total_changed_count(), 4);
        assert!(status.has_conflicts());
    }

    #[test]
    fn test_clean_status() {
        let status = RepositoryStatus::from_records("main".to_string(), None, 2, 0, vec![]);
        assert!(!status.has_changes());
        assert!(status.has_unpushed_commits());
    }

    #[test]
    fn test_prior_path_only_for_renames() {
        let renamed = change(
            "new.rs",
            ChangeKind::Renamed {
                from: Some("old.rs".to_string()),
            },
            true,
        );
        assert_eq!(renamed.prior_path(), Some("old.rs"));

        let copied = change("copy.rs", ChangeKind::Copied, true);
        assert_eq!(copied.prior_path(), None);
    }

    #[test]
    fn test_from_code_unknown_defaults_to_modified() {
        assert_eq!(ChangeKind::from_code('T'), ChangeKind::Modified);
        assert_eq!(ChangeKind::from_code('U'), ChangeKind::Conflicted);
        assert_eq!(ChangeKind::from_code('?'), ChangeKind::Untracked);
    }

    #[test]
    fn test_file_name_and_directory() {
        let nested = change("src/git/runner.rs", ChangeKind::Modified, false);
        assert_eq!(nested.file_name(), "runner.rs");
        assert_eq!(nested.directory(), "src/git");

        let top = change("Cargo.toml", ChangeKind::Modified, false);
        assert_eq!(top.file_name(), "Cargo.toml");
        assert_eq!(top.directory(), "");
    }

    #[test]
    fn test_indicator() {
        assert_eq!(change("a", ChangeKind::Added, true).indicator(), 'A');
        assert_eq!(
            change("b", ChangeKind::Renamed { from: None }, true).indicator(),
            'R'
        );
        assert_eq!(change("c", ChangeKind::Untracked, false).indicator(), '?');
    }
}
