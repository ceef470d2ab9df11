//! Session middleware configuration and flash toasts.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The session
//! carries nothing but the pending flash toast, so expiry is short.

use sqlx::PgPool;
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AdminConfig;
use crate::models::{Flash, session_keys};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "storeboard_session";

/// Session expiry time in seconds (1 hour of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// # Errors
///
/// Returns an error if the schema or table name is rejected by the store.
pub fn create_session_layer(
    pool: &PgPool,
    config: &AdminConfig,
) -> Result<SessionManagerLayer<PostgresStore>, sqlx::Error> {
    // The session table is created by the storeboard migration.
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("storeboard")
        .map_err(|e| sqlx::Error::Configuration(e.into()))?
        .with_table_name("session")
        .map_err(|e| sqlx::Error::Configuration(e.into()))?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/"))
}

/// Queue a toast for the next rendered page.
///
/// A failure to persist the toast is logged and otherwise ignored: the
/// mutation it reports has already happened.
pub async fn push_flash(session: &Session, flash: Flash) {
    if let Err(e) = session.insert(session_keys::FLASH, &flash).await {
        tracing::warn!(error = %e, "Failed to store flash toast");
    }
}

/// Take the pending toast, if any, so it is shown exactly once.
pub async fn take_flash(session: &Session) -> Option<Flash> {
    match session.remove::<Flash>(session_keys::FLASH).await {
        Ok(flash) => flash,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash toast");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_flash_is_shown_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        push_flash(&session, Flash::success("Billboard created")).await;

        assert_eq!(
            take_flash(&session).await,
            Some(Flash::success("Billboard created"))
        );
        assert_eq!(take_flash(&session).await, None);
    }
}
