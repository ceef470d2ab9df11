//! Storeboard Client - the dashboard's behaviour without a browser.
//!
//! Everything a dashboard page does besides drawing lives here: validating a
//! form before it is sent, issuing exactly one REST call, navigating back to
//! the list, refreshing and raising a toast. The browser-facing pieces
//! (navigation, toasts, clipboard) are traits so the CLI and the tests can
//! drive the same code.
//!
//! # Modules
//!
//! - [`transport`] - REST requests and the reqwest-backed transport
//! - [`ui`] - Navigation, notification and clipboard seams
//! - [`loading`] - Busy flag released by a drop guard
//! - [`form`] - Create/update/delete helpers for entities and stores
//! - [`gate`] - Delete confirmation gate
//! - [`table`] - Loading entity tables and row actions
//! - [`copy`] - Copy-to-clipboard indicator

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod copy;
pub mod error;
pub mod form;
pub mod gate;
pub mod loading;
pub mod table;
pub mod transport;
pub mod ui;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::ClientConfig;
pub use error::{ClipboardError, FormError, TransportError};
pub use form::{EntityForm, StoreModal, StoreSettings};
pub use gate::DeleteGate;
pub use loading::{LoadingFlag, LoadingGuard};
pub use table::{RowActions, TableClient};
pub use transport::{ApiRequest, HttpTransport, Method, Transport};
pub use ui::{Clipboard, Navigator, Notifier, Ui};
