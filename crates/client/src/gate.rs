//! Delete confirmation gate.
//!
//! The "Are you sure?" modal: opened by a delete control, closed by cancel,
//! and the only way to run the delete itself. While the action runs the
//! gate can neither be closed nor confirmed again.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::loading::LoadingFlag;

#[derive(Debug, Default)]
pub struct DeleteGate {
    open: AtomicBool,
    loading: LoadingFlag,
}

impl DeleteGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Close the gate. Refused (returns `false`) while the action runs.
    pub fn close(&self) -> bool {
        if self.loading.is_loading() {
            return false;
        }
        self.open.store(false, Ordering::Release);
        true
    }

    /// Run `action` once, then close.
    ///
    /// Returns `None` without running anything when the gate is closed or
    /// the action is already running.
    pub async fn confirm<F, Fut>(&self, action: F) -> Option<Fut::Output>
    where
        F: FnOnce() -> Fut,
        Fut: Future,
    {
        if !self.is_open() {
            return None;
        }
        let guard = self.loading.try_begin()?;
        let output = action().await;
        self.open.store(false, Ordering::Release);
        drop(guard);
        Some(output)
    }
}
