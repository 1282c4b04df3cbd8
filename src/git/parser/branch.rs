//! Branch list parser (`git branch -a --format=...`)

use crate::model::Branch;

/// Parse `git branch -a --format=%(refname:short)|%(upstream:short)|%(HEAD)`
///
/// Symbolic `HEAD` entries (e.g. `origin/HEAD`) are skipped.
pub fn parse_branch_list(output: &str) -> Vec<Branch> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('|');
            let name = fields.next()?.trim();
            let upstream = fields.next()?.trim();
            let head = fields.next()?.trim();

            if name.is_empty() || name.contains("HEAD") {
                return None;
            }

            Some(Branch {
                name: name.to_string(),
                is_remote: name.starts_with("origin/") || name.contains("remotes/"),
                is_current: head == "*",
                upstream: (!upstream.is_empty()).then(|| upstream.to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_branch_list() {
        let output = "main|origin/main|*\nfeature||\norigin/HEAD||\norigin/main||\n";
        let branches = parse_branch_list(output);

        assert_eq!(branches.len(), 3);
        assert_eq!(branches[0].name, "main");
        assert!(branches[0].is_current);
        assert_eq!(branches[0].upstream.as_deref(), Some("origin/main"));

        assert_eq!(branches[1].name, "feature");
        assert!(!branches[1].is_current);
        assert_eq!(branches[1].upstream, None);

        assert_eq!(branches[2].name, "origin/main");
        assert!(branches[2].is_remote);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        assert!(parse_branch_list("just-a-name\n\n|x|\n").is_empty());
    }
}
