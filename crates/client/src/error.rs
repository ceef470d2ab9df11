//! Client error types.

use thiserror::Error;

use storeboard_core::FieldErrors;

/// A REST call that did not produce a usable response.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request never got a response.
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The request body could not be encoded.
    #[error("Could not encode request: {0}")]
    Encode(String),

    /// The response body was not what we expected.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl TransportError {
    /// HTTP status, when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Why a form did not save.
#[derive(Debug, Clone, Error)]
pub enum FormError {
    /// Validation failed; nothing was sent.
    #[error("Validation failed: {0}")]
    Invalid(FieldErrors),

    /// A call from this component is still in flight.
    #[error("Another request is in progress")]
    Busy,

    /// Delete was requested on a form that has no record yet.
    #[error("Nothing to delete")]
    NotSaved,

    /// The server call failed; the user has already been notified.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Clipboard write failure.
#[derive(Debug, Clone, Error)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_when_server_answered() {
        let err = TransportError::Status {
            status: 409,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(TransportError::Request("refused".to_string()).status(), None);
    }

    #[test]
    fn test_transport_error_display() {
        let err = FormError::from(TransportError::Status {
            status: 500,
            body: "oops".to_string(),
        });
        assert_eq!(err.to_string(), "Server returned 500: oops");
    }
}
