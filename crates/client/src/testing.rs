//! In-memory doubles for the transport and the UI seams.
//!
//! [`MockTransport`] records every request and answers from a queue of
//! canned responses (an empty JSON object when the queue runs dry).
//! [`Harness`] bundles recording navigator, notifier and clipboard.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Value, json};
use tokio::sync::Notify;

use crate::error::{ClipboardError, TransportError};
use crate::transport::{ApiRequest, Transport};
use crate::ui::{Clipboard, Navigator, Notifier, Ui};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Transport that records requests instead of sending them.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    hold: Mutex<Option<Arc<Notify>>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response body.
    pub fn respond(&self, body: Value) {
        lock(&self.responses).push_back(Ok(body));
    }

    /// Queue an error response with `status`.
    pub fn fail(&self, status: u16) {
        lock(&self.responses).push_back(Err(TransportError::Status {
            status,
            body: json!({"error": "refused"}).to_string(),
        }));
    }

    /// Make the next call wait until the returned handle is notified.
    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *lock(&self.hold) = Some(Arc::clone(&notify));
        notify
    }

    /// Every request sent so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        lock(&self.requests).push(request);
        let hold = lock(&self.hold).take();
        if let Some(notify) = hold {
            notify.notified().await;
        }
        lock(&self.responses).pop_front().unwrap_or_else(|| Ok(json!({})))
    }
}

/// A navigation the component performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    Push(String),
    Refresh,
}

/// Records navigation.
#[derive(Debug, Default)]
pub struct RecordingNavigator(Mutex<Vec<NavEvent>>);

impl RecordingNavigator {
    #[must_use]
    pub fn events(&self) -> Vec<NavEvent> {
        lock(&self.0).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        lock(&self.0).push(NavEvent::Push(path.to_string()));
    }

    fn refresh(&self) {
        lock(&self.0).push(NavEvent::Refresh);
    }
}

/// A toast the component raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

/// Records toasts.
#[derive(Debug, Default)]
pub struct RecordingNotifier(Mutex<Vec<Toast>>);

impl RecordingNotifier {
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        lock(&self.0).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        lock(&self.0).push(Toast::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        lock(&self.0).push(Toast::Error(message.to_string()));
    }
}

/// Clipboard held in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard(Mutex<Option<String>>);

impl MemoryClipboard {
    #[must_use]
    pub fn text(&self) -> Option<String> {
        lock(&self.0).clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *lock(&self.0) = Some(text.to_string());
        Ok(())
    }
}

/// Recording seams plus the [`Ui`] that feeds them.
#[derive(Debug, Default, Clone)]
pub struct Harness {
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub clipboard: Arc<MemoryClipboard>,
}

impl Harness {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ui(&self) -> Ui {
        Ui::new(
            Arc::clone(&self.navigator) as Arc<dyn Navigator>,
            Arc::clone(&self.notifier) as Arc<dyn Notifier>,
            Arc::clone(&self.clipboard) as Arc<dyn Clipboard>,
        )
    }
}
