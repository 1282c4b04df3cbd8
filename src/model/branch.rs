//! Branch model for `git branch -a`

/// Branch information from `git branch -a --format=...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Short ref name (e.g., "main", "origin/feature-x")
    pub name: String,
    /// Whether this is a remote-tracking branch
    pub is_remote: bool,
    /// Whether HEAD points at this branch
    pub is_current: bool,
    /// Configured upstream (e.g., "origin/main")
    pub upstream: Option<String>,
}

impl Branch {
    /// Name without the `origin/` prefix
    pub fn display_name(&self) -> &str {
        if self.is_remote {
            self.name.strip_prefix("origin/").unwrap_or(&self.name)
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_local() {
        let branch = Branch {
            name: "main".into(),
            is_remote: false,
            is_current: true,
            upstream: Some("origin/main".into()),
        };
        assert_eq!(branch.display_name(), "main");
    }

    #[test]
    fn test_display_name_remote() {
        let branch = Branch {
            name: "origin/feature-x".into(),
            is_remote: true,
            is_current: false,
            upstream: None,
        };
        assert_eq!(branch.display_name(), "feature-x");
    }
}
