//! The browser-facing seams: navigation, toasts and the clipboard.
//!
//! In the dashboard these are the router, the toast area and
//! `navigator.clipboard`. The CLI uses the log-backed versions below.

use std::sync::Arc;

use tracing::{error, info};

use crate::error::ClipboardError;

/// Moves between dashboard routes.
pub trait Navigator: Send + Sync {
    /// Go to `path`.
    fn push(&self, path: &str);

    /// Re-fetch the current route's data.
    fn refresh(&self);
}

/// Shows toasts.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes to the system clipboard.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns `ClipboardError` if the clipboard is unavailable.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The seams a component needs, shared between components.
#[derive(Clone)]
pub struct Ui {
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub clipboard: Arc<dyn Clipboard>,
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui").finish_non_exhaustive()
    }
}

impl Ui {
    #[must_use]
    pub fn new(
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            navigator,
            notifier,
            clipboard,
        }
    }

    /// Seams for running without a browser: navigation and toasts go to
    /// the log, the clipboard is unavailable.
    #[must_use]
    pub fn headless() -> Self {
        Self::new(Arc::new(LogNavigator), Arc::new(LogNotifier), Arc::new(NoClipboard))
    }
}

/// Logs navigation instead of performing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn push(&self, path: &str) {
        info!(path, "navigate");
    }

    fn refresh(&self) {
        info!("refresh");
    }
}

/// Logs toasts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(message, "toast");
    }

    fn error(&self, message: &str) {
        error!(message, "toast");
    }
}

/// Clipboard that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError("no clipboard in this environment".to_string()))
    }
}
