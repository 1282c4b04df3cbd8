//! Set of repositories with an operation in progress

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::model::RepoId;

/// Atomic test-and-set membership over repository identities.
///
/// A poisoned lock is recovered rather than propagated: removal must succeed
/// even after an operation panicked, or the repository would stay busy forever.
#[derive(Debug, Default)]
pub struct InFlightSet {
    ids: Mutex<HashSet<RepoId>>,
}

impl InFlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id`; `false` if it was already present
    pub fn try_insert(&self, id: &RepoId) -> bool {
        self.lock().insert(id.clone())
    }

    pub fn remove(&self, id: &RepoId) {
        self.lock().remove(id);
    }

    pub fn contains(&self, id: &RepoId) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<RepoId>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_insert_is_test_and_set() {
        let set = InFlightSet::new();
        let id = RepoId::new("a");

        assert!(set.try_insert(&id));
        assert!(!set.try_insert(&id));
        assert!(set.contains(&id));

        set.remove(&id);
        assert!(set.is_empty());
        assert!(set.try_insert(&id));
    }

    #[test]
    fn test_concurrent_inserts_admit_exactly_one() {
        let set = Arc::new(InFlightSet::new());
        let id = RepoId::new("shared");

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let set = Arc::clone(&set);
                let id = id.clone();
                thread::spawn(move || set.try_insert(&id))
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|inserted| *inserted)
            .count();
        assert_eq!(admitted, 1);
        assert_eq!(set.len(), 1);
    }
}
