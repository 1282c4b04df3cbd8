//! Pull output summarizer
//!
//! Extracts structured facts from the human-readable output of
//! `git pull --stat`. Wording changes in future git versions leave fields
//! empty rather than guessing.

use crate::git::constants::pull::ALREADY_UP_TO_DATE;
use crate::model::PullSummary;

use super::{PULL_SHORTSTAT_REGEX, PULL_UPDATING_REGEX};

/// Parse combined stdout+stderr of a successful pull
pub fn parse_pull_summary(output: &str) -> PullSummary {
    let lines: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut summary = PullSummary {
        is_already_up_to_date: lines.iter().any(|line| *line == ALREADY_UP_TO_DATE),
        ..PullSummary::default()
    };

    for line in &lines {
        if summary.commit_range.is_none()
            && let Some(caps) = PULL_UPDATING_REGEX.captures(line)
        {
            summary.commit_range = Some(format!("{}..{}", &caps[1], &caps[2]));
        }

        if summary.changed_files.is_none()
            && let Some(caps) = PULL_SHORTSTAT_REGEX.captures(line)
        {
            summary.changed_files = caps[1].parse().ok();
            summary.insertions = caps.get(2).and_then(|m| m.as_str().parse().ok());
            summary.deletions = caps.get(3).and_then(|m| m.as_str().parse().ok());
        }
    }

    summary
}
