//! Heuristic classification of failed git invocations
//!
//! Matches on lower-cased stderr. The child always runs under a fixed `C`
//! locale, so these English substrings stay stable across user setups.
//! Ambiguous messages fall through to `CommandFailed`.

use super::GitError;
use super::command::CommandResult;
use super::constants::errors;

/// Map a non-zero result to an error category
pub fn classify_failure(result: &CommandResult) -> GitError {
    let stderr = result.stderr.trim();
    let lowered = stderr.to_lowercase();

    if lowered.contains(errors::NOT_A_REPO) {
        GitError::NotARepository
    } else if lowered.contains(errors::CONFLICT) || lowered.contains(errors::MERGE) {
        GitError::MergeConflict
    } else if lowered.contains(errors::UNRESOLVED_HOST) || lowered.contains(errors::NETWORK) {
        GitError::NetworkError(stderr.to_string())
    } else if stderr.is_empty() {
        GitError::CommandFailed(result.stdout.trim().to_string())
    } else {
        GitError::CommandFailed(stderr.to_string())
    }
}
