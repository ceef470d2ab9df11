//! Session-stored types.
//!
//! The dashboard keeps no authentication state in the session (the identity
//! provider owns that); sessions only carry one-shot flash toasts across the
//! redirect that follows a mutation.

use serde::{Deserialize, Serialize};

/// Tone of a flash toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    /// CSS modifier used by the toast markup.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Error => "toast-error",
        }
    }
}

/// A toast shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for the pending flash toast.
    pub const FLASH: &str = "flash";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_serde() {
        let flash = Flash::success("Billboard created");
        let json = serde_json::to_string(&flash).unwrap();
        assert_eq!(json, r#"{"level":"success","message":"Billboard created"}"#);
        assert_eq!(serde_json::from_str::<Flash>(&json).unwrap(), flash);
    }
}
