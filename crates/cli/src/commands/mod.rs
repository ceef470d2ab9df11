//! CLI subcommands.

use std::sync::Arc;

use storeboard_client::config::ConfigError;
use storeboard_client::{ClientConfig, FormError, HttpTransport, TransportError, Ui};
use thiserror::Error;

pub mod entity;
pub mod migrate;
pub mod store;

/// Errors of the store and entity commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Body must be a JSON object")]
    NotAnObject,

    #[error("{0} cannot be changed from the dashboard")]
    ReadOnly(storeboard_core::EntityKind),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Transport and UI seams shared by the commands.
pub struct Context {
    pub transport: Arc<HttpTransport>,
    pub ui: Ui,
}

impl Context {
    /// Connect to the dashboard named by `STOREBOARD_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Config` if the environment is invalid.
    pub fn from_env() -> Result<Self, CommandError> {
        let config = ClientConfig::from_env()?;
        if config.user_id.is_none() {
            tracing::warn!("STOREBOARD_USER_ID not set; only public reads will succeed");
        }
        tracing::debug!(?config, "Client configured");
        Ok(Self {
            transport: Arc::new(HttpTransport::new(&config)),
            ui: Ui::headless(),
        })
    }
}
