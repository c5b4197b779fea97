//! Warn-once policy for the uniqueness diagnostic.

use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether the ambient uniqueness check may still fire.
///
/// A fresh policy is warn-eligible. The first ambient check that finds
/// duplicate rows clears the flag, so later declarations stay quiet unless a
/// check is explicitly forced. Forced checks never clear it.
#[derive(Debug)]
pub struct UniquenessPolicy {
    warn_eligible: AtomicBool,
}

impl UniquenessPolicy {
    /// Create a warn-eligible policy.
    pub fn new() -> Self {
        Self {
            warn_eligible: AtomicBool::new(true),
        }
    }

    /// Whether the ambient check will run on the next validation.
    pub fn is_warn_eligible(&self) -> bool {
        self.warn_eligible.load(Ordering::Relaxed)
    }

    /// Stop ambient checks for the lifetime of this policy.
    pub(crate) fn consume(&self) {
        self.warn_eligible.store(false, Ordering::Relaxed);
    }

    /// Make ambient checks eligible again.
    pub fn reset(&self) {
        self.warn_eligible.store(true, Ordering::Relaxed);
    }
}

impl Default for UniquenessPolicy {
    fn default() -> Self {
        Self::new()
    }
}
