//! Confirmation-gated cache of solved arrangements
//!
//! A solution is only trusted for a source once the same solution has been
//! recorded for it several times. Until then it sits in a pending table with
//! a confirmation counter. Different solutions for the same source are counted
//! separately and never merged, so one bad solve cannot poison the cache.

use crate::algorithm::cache::BoundedCache;
use crate::algorithm::sweep::Solution;

/// Identity of a scrambled source: caller-supplied key plus image size
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SolutionKey {
    /// Opaque caller-supplied identifier, e.g. a series or chapter id
    pub source: String,
    /// Scrambled image width
    pub width: u32,
    /// Scrambled image height
    pub height: u32,
}

impl SolutionKey {
    /// Create a key
    pub fn new(source: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source: source.into(),
            width,
            height,
        }
    }
}

/// Effect of recording a solution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Counted but not yet trusted
    Pending {
        /// Times this exact solution has now been recorded for the key
        confirmations: usize,
    },
    /// This record reached the threshold and the solution is now trusted
    Promoted,
    /// The same solution was already trusted for the key
    AlreadyTrusted,
    /// A different solution is already trusted for the key; nothing changed
    Conflicting,
}

/// Trusted and pending solutions per source key
pub struct SolutionCache {
    trusted: BoundedCache<SolutionKey, Solution>,
    pending: BoundedCache<(SolutionKey, Solution), usize>,
    threshold: usize,
}

impl SolutionCache {
    /// Create a cache holding at most `capacity` trusted keys and, separately,
    /// at most `capacity` pending key and solution counters
    ///
    /// A solution is trusted on its `threshold`-th record; a threshold of zero
    /// is treated as one.
    pub fn new(capacity: usize, threshold: usize) -> Self {
        Self {
            trusted: BoundedCache::new(capacity),
            pending: BoundedCache::new(capacity),
            threshold: threshold.max(1),
        }
    }

    /// Records needed before a solution is trusted
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    /// Count one more occurrence of `solution` for `key`
    pub fn record(&mut self, key: &SolutionKey, solution: &Solution) -> RecordOutcome {
        if let Some(trusted) = self.trusted.get(key) {
            return if trusted == *solution {
                RecordOutcome::AlreadyTrusted
            } else {
                log::warn!(
                    "{}: solution differs from the trusted one, keeping the trusted one",
                    key.source
                );
                RecordOutcome::Conflicting
            };
        }

        let pending_key = (key.clone(), solution.clone());
        let confirmations = self.pending.peek(&pending_key).unwrap_or(0) + 1;

        if confirmations < self.threshold {
            self.pending.insert(pending_key, confirmations);
            return RecordOutcome::Pending { confirmations };
        }

        self.pending.remove(&pending_key);
        self.drop_pending(key);
        self.trusted.insert(key.clone(), solution.clone());
        log::info!(
            "{}: trusting {}x{} solution after {confirmations} confirmations",
            key.source,
            solution.geometry.width,
            solution.geometry.height
        );
        RecordOutcome::Promoted
    }

    /// Trusted solution for `key`, if any
    pub fn lookup_trusted(&mut self, key: &SolutionKey) -> Option<Solution> {
        self.trusted.get(key)
    }

    /// Confirmations counted so far for an untrusted solution
    pub fn confirmations(&self, key: &SolutionKey, solution: &Solution) -> usize {
        self.pending
            .peek(&(key.clone(), solution.clone()))
            .unwrap_or(0)
    }

    /// Forget everything known about `key`
    ///
    /// Returns whether a trusted solution was removed.
    pub fn invalidate(&mut self, key: &SolutionKey) -> bool {
        self.drop_pending(key);
        self.trusted.remove(key).is_some()
    }

    /// Number of trusted keys
    pub fn trusted_len(&self) -> usize {
        self.trusted.len()
    }

    /// Number of pending solution counters
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn drop_pending(&self, key: &SolutionKey) {
        self.pending.retain(|(pending_key, _), _| pending_key != key);
    }
}
