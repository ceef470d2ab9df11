//! Copy-to-clipboard indicator.
//!
//! Copying flips the indicator on; it reads as off again [`COPY_RESET`]
//! after the most recent copy.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

use crate::error::ClipboardError;
use crate::ui::Ui;

/// How long the "copied" state lasts.
pub const COPY_RESET: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Default)]
pub struct CopyIndicator {
    /// When the latest copy stops showing.
    until: Arc<Mutex<Option<Instant>>>,
}

impl CopyIndicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_copied(&self) -> bool {
        self.until
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some_and(|until| Instant::now() < until)
    }

    /// Write `text` to the clipboard, toast `message` and flip the indicator.
    ///
    /// # Errors
    ///
    /// Returns `ClipboardError` if the clipboard is unavailable; the
    /// indicator is left untouched.
    pub fn copy(&self, ui: &Ui, text: &str, message: &str) -> Result<(), ClipboardError> {
        if let Err(e) = ui.clipboard.write_text(text) {
            warn!(error = %e, "Copy failed");
            return Err(e);
        }
        ui.notifier.success(message);

        *self.until.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now() + COPY_RESET);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{Harness, Toast};
    use crate::ui::NoClipboard;

    #[tokio::test(start_paused = true)]
    async fn test_indicator_reverts_after_a_second() {
        let harness = Harness::new();
        let indicator = CopyIndicator::new();

        indicator
            .copy(&harness.ui(), "b-123", "Billboard ID copied to clipboard.")
            .unwrap();
        assert_eq!(harness.clipboard.text().as_deref(), Some("b-123"));
        assert_eq!(
            harness.notifier.toasts(),
            vec![Toast::Success("Billboard ID copied to clipboard.".to_string())]
        );
        assert!(indicator.is_copied());

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(indicator.is_copied());

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(!indicator.is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_copy_restarts_timer() {
        let harness = Harness::new();
        let indicator = CopyIndicator::new();

        indicator.copy(&harness.ui(), "a", "copied").unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        indicator.copy(&harness.ui(), "b", "copied").unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert!(indicator.is_copied());

        tokio::time::sleep(Duration::from_millis(500)).await;
        tokio::task::yield_now().await;
        assert!(!indicator.is_copied());
    }

    #[test]
    fn test_copy_works_without_a_runtime() {
        let harness = Harness::new();
        let indicator = CopyIndicator::new();

        indicator.copy(&harness.ui(), "c-1", "copied").unwrap();

        assert!(indicator.is_copied());
        assert_eq!(harness.clipboard.text().as_deref(), Some("c-1"));
    }

    #[tokio::test]
    async fn test_failed_copy_leaves_indicator_off() {
        let harness = Harness::new();
        let ui = Ui::new(
            harness.ui().navigator,
            harness.ui().notifier,
            Arc::new(NoClipboard),
        );
        let indicator = CopyIndicator::new();

        assert!(indicator.copy(&ui, "x", "copied").is_err());
        assert!(!indicator.is_copied());
        assert!(harness.notifier.toasts().is_empty());
    }
}
