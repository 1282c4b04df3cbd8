//! Commit log parser (`git log --format=%h|%H|%s|%an|%ar|%at`)

use crate::model::Commit;

use super::Parser;

impl Parser {
    /// Parse log output; lines with fewer than six fields are skipped.
    ///
    /// The subject may itself contain `|`, so the last three fields are
    /// taken from the right.
    pub fn parse_log(output: &str) -> Vec<Commit> {
        output.lines().filter_map(Self::parse_log_record).collect()
    }

    pub(super) fn parse_log_record(line: &str) -> Option<Commit> {
        let mut head = line.splitn(3, '|');
        let short_hash = head.next()?;
        let hash = head.next()?;
        let rest = head.next()?;

        let mut tail = rest.rsplitn(4, '|');
        let timestamp = tail.next()?;
        let relative_date = tail.next()?;
        let author = tail.next()?;
        let subject = tail.next()?;

        if short_hash.is_empty() || hash.is_empty() {
            return None;
        }

        Some(Commit {
            short_hash: short_hash.to_string(),
            hash: hash.to_string(),
            subject: subject.to_string(),
            author: author.to_string(),
            relative_date: relative_date.to_string(),
            timestamp: timestamp.trim().parse().ok(),
        })
    }
}
