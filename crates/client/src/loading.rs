//! Busy flag for a component's in-flight call.
//!
//! At most one mutating call per component: [`LoadingFlag::try_begin`] hands
//! out a guard only when the flag is clear, and the guard clears it again on
//! drop, whether the call succeeded, failed or was cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared busy flag.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a call is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Set the flag, or `None` if it is already set.
    #[must_use]
    pub fn try_begin(&self) -> Option<LoadingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard(Arc::clone(&self.0)))
    }
}

/// Clears the flag when dropped.
#[derive(Debug)]
#[must_use = "the flag clears as soon as the guard is dropped"]
pub struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
