//! Status output parser (`git status --porcelain=v2 --branch`)

use crate::git::constants::headers;
use crate::model::{ChangeKind, FileChange, RepositoryStatus};

use super::Parser;
use super::path::decode_path;

/// Index/worktree code meaning "no change on this side"
const UNCHANGED: char = '.';

/// Facts collected from `# branch.*` header lines
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct BranchHeaders<'a> {
    pub head: Option<&'a str>,
    pub oid: Option<&'a str>,
    pub upstream: Option<&'a str>,
    pub ahead: u32,
    pub behind: u32,
}

impl BranchHeaders<'_> {
    /// Resolve the branch label.
    ///
    /// Detached → `detached@<short oid>` (or `HEAD` without a commit);
    /// named head → the name; no head header → short oid, else `HEAD`.
    pub(super) fn current_branch(&self) -> String {
        let short_oid = self
            .oid
            .filter(|oid| !oid.is_empty() && *oid != headers::INITIAL)
            .map(|oid| oid.chars().take(headers::SHORT_OID_LEN).collect::<String>());

        match (self.head.filter(|h| !h.is_empty()), short_oid) {
            (Some(headers::DETACHED), Some(oid)) => format!("detached@{oid}"),
            (Some(headers::DETACHED), None) => headers::HEAD_SENTINEL.to_string(),
            (Some(name), _) => name.to_string(),
            (None, Some(oid)) => oid,
            (None, None) => headers::HEAD_SENTINEL.to_string(),
        }
    }
}

impl Parser {
    /// Parse `git status --porcelain=v2 --branch` output.
    ///
    /// Never fails: unknown lines are skipped and unknown status codes map
    /// to `Modified`.
    pub fn parse_status(output: &str) -> RepositoryStatus {
        let branch = Self::parse_branch_headers(output);
        let records = Self::parse_status_entries(output);

        RepositoryStatus::from_records(
            branch.current_branch(),
            branch.upstream.map(str::to_string),
            branch.ahead,
            branch.behind,
            records,
        )
    }

    pub(super) fn parse_branch_headers(output: &str) -> BranchHeaders<'_> {
        let mut branch = BranchHeaders::default();

        for line in output.lines() {
            if let Some(head) = line.strip_prefix(headers::BRANCH_HEAD) {
                branch.head = Some(head.trim());
            } else if let Some(oid) = line.strip_prefix(headers::BRANCH_OID) {
                branch.oid = Some(oid.trim());
            } else if let Some(upstream) = line.strip_prefix(headers::BRANCH_UPSTREAM) {
                branch.upstream = Some(upstream.trim());
            } else if let Some(counts) = line.strip_prefix(headers::BRANCH_AB) {
                // Format: "+<ahead> -<behind>"
                for count in counts.split_whitespace() {
                    if let Some(n) = count.strip_prefix('+') {
                        branch.ahead = n.parse().unwrap_or(0);
                    } else if let Some(n) = count.strip_prefix('-') {
                        branch.behind = n.parse().unwrap_or(0);
                    }
                }
            }
        }

        branch
    }

    /// Parse every entry line into zero, one, or two change records
    pub(super) fn parse_status_entries(output: &str) -> Vec<FileChange> {
        let mut records = Vec::new();

        for line in output.lines() {
            if let Some(rest) = line.strip_prefix("1 ") {
                Self::parse_ordinary_entry(rest, &mut records);
            } else if let Some(rest) = line.strip_prefix("2 ") {
                Self::parse_rename_entry(rest, &mut records);
            } else if let Some(rest) = line.strip_prefix("u ") {
                Self::parse_unmerged_entry(rest, &mut records);
            } else if let Some(path) = line.strip_prefix("? ") {
                let path = decode_path(path);
                if !path.is_empty() {
                    records.push(FileChange::new(path, ChangeKind::Untracked, false));
                }
            }
            // "# ..." headers and "! ..." ignored entries are not records
        }

        records
    }

    /// `1 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <path>`
    fn parse_ordinary_entry(rest: &str, records: &mut Vec<FileChange>) {
        let fields: Vec<&str> = rest.splitn(8, ' ').collect();
        let [xy, _, _, _, _, _, _, path] = fields[..] else {
            return;
        };
        let path = decode_path(path);
        if path.is_empty() {
            return;
        }
        Self::push_sides(xy, &path, None, records);
    }

    /// `2 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <X><score> <path><TAB><origPath>`
    fn parse_rename_entry(rest: &str, records: &mut Vec<FileChange>) {
        let fields: Vec<&str> = rest.splitn(9, ' ').collect();
        let [xy, _, _, _, _, _, _, _, paths] = fields[..] else {
            return;
        };

        let (path, prior) = match paths.split_once('\t') {
            Some((new, old)) => {
                let old = decode_path(old);
                (decode_path(new), (!old.is_empty()).then_some(old))
            }
            None => (decode_path(paths), None),
        };
        if path.is_empty() {
            return;
        }
        Self::push_sides(xy, &path, prior, records);
    }

    /// `u <XY> <sub> <m1> <m2> <m3> <mW> <h1> <h2> <h3> <path>`
    fn parse_unmerged_entry(rest: &str, records: &mut Vec<FileChange>) {
        let fields: Vec<&str> = rest.splitn(10, ' ').collect();
        let Some(path) = fields.get(9).map(|p| decode_path(p)) else {
            return;
        };
        if !path.is_empty() {
            records.push(FileChange::new(path, ChangeKind::Conflicted, false));
        }
    }

    /// Emit a staged record for a changed index side and an unstaged record
    /// for a changed worktree side.
    fn push_sides(xy: &str, path: &str, prior: Option<String>, records: &mut Vec<FileChange>) {
        let mut codes = xy.chars();
        let (Some(index), Some(worktree)) = (codes.next(), codes.next()) else {
            return;
        };

        for (code, staged) in [(index, true), (worktree, false)] {
            if code == UNCHANGED {
                continue;
            }
            let kind = match ChangeKind::from_code(code) {
                ChangeKind::Renamed { .. } => ChangeKind::Renamed {
                    from: prior.clone(),
                },
                kind => kind,
            };
            records.push(FileChange::new(path, kind, staged));
        }
    }
}
