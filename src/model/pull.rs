//! Pull result summary

/// Structured facts extracted from `git pull --stat` output.
///
/// Every optional field is independent of the others. `None` means the
/// output did not contain the fact, not that it was zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PullSummary {
    pub is_already_up_to_date: bool,
    /// `<old>..<new>` from the `Updating` line
    pub commit_range: Option<String>,
    pub changed_files: Option<u32>,
    pub insertions: Option<u32>,
    pub deletions: Option<u32>,
}

impl PullSummary {
    /// Check if any structured fact was recognized
    pub fn is_parsed(&self) -> bool {
        self.is_already_up_to_date
            || self.commit_range.is_some()
            || self.changed_files.is_some()
            || self.insertions.is_some()
            || self.deletions.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unparsed() {
        assert!(!PullSummary::default().is_parsed());
    }

    #[test]
    fn test_up_to_date_is_parsed() {
        let summary = PullSummary {
            is_already_up_to_date: true,
            ..PullSummary::default()
        };
        assert!(summary.is_parsed());
    }
}
