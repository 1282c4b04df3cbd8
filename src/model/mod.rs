//! Data models for gitfleet
//!
//! This module contains UI-independent data structures representing
//! git concepts like working-tree status, branches, and pull results.

mod branch;
mod commit;
mod file_status;
mod pull;
mod repository;

pub use branch::Branch;
pub use commit::Commit;
pub use file_status::{ChangeKind, FileChange, RepositoryStatus};
pub use pull::PullSummary;
pub use repository::{RepoId, Repository};
