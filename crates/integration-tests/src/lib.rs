//! Integration tests for Storeboard.
//!
//! # Running Tests
//!
//! ```bash
//! # Scenario tests (no server needed)
//! cargo test -p storeboard-integration-tests
//!
//! # Repository tests against a scratch database (skipped when unset)
//! ADMIN_DATABASE_URL=postgres://localhost/storeboard_test \
//!     cargo test -p storeboard-integration-tests --test repositories
//!
//! # Live tests against a running dashboard
//! STOREBOARD_API_URL=http://localhost:3001 STOREBOARD_USER_ID=user_test \
//!     cargo test -p storeboard-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `scenarios` - Dashboard flows over the in-memory transport
//! - `repositories` - SQL of the admin repositories (needs `ADMIN_DATABASE_URL`)
//! - `live_api` - REST API of a running server (ignored by default)

use std::path::Path;
use std::sync::Arc;

use secrecy::SecretString;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use storeboard_client::testing::{Harness, MockTransport};
use storeboard_client::{ClientConfig, HttpTransport, Ui};
use storeboard_core::StoreId;

/// A store id that never changes between runs.
#[must_use]
pub fn fixed_store_id() -> StoreId {
    StoreId::new(uuid::Uuid::from_u128(0x7b0c_2f4e_3c1a_4d8e_9f6b_2a5d_8e1c_4b7a))
}

/// In-memory transport plus recording seams, scoped to one store.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub transport: Arc<MockTransport>,
    pub harness: Harness,
    pub store_id: StoreId,
}

impl Scenario {
    #[must_use]
    pub fn new() -> Self {
        Self {
            transport: Arc::new(MockTransport::new()),
            harness: Harness::new(),
            store_id: fixed_store_id(),
        }
    }

    #[must_use]
    pub fn ui(&self) -> Ui {
        self.harness.ui()
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Base URL of the running dashboard (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("STOREBOARD_API_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Transport for a running dashboard, signed in as `user_id` if given.
///
/// # Panics
///
/// Panics if `STOREBOARD_API_URL` is not an absolute URL.
#[must_use]
#[allow(clippy::expect_used)]
pub fn live_transport(user_id: Option<&str>) -> Arc<HttpTransport> {
    let config = ClientConfig::new(&admin_base_url(), user_id.map(SecretString::from))
        .expect("STOREBOARD_API_URL must be an absolute URL");
    Arc::new(HttpTransport::new(&config))
}

/// User the live tests act as.
#[must_use]
pub fn live_user_id() -> String {
    std::env::var("STOREBOARD_USER_ID").unwrap_or_else(|_| "user_integration_test".to_string())
}

/// A label nobody else will have picked.
#[must_use]
pub fn unique(prefix: &str) -> String {
    format!("{prefix} {}", uuid::Uuid::new_v4().simple())
}

/// Pool on a migrated scratch database, or `None` when no database is
/// configured.
///
/// Reads `ADMIN_DATABASE_URL`, falling back to `DATABASE_URL`, the same way
/// the admin server does.
///
/// # Panics
///
/// Panics if a database is configured but unreachable or the migrations fail.
#[allow(clippy::expect_used)]
pub async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()?;

    let pool = storeboard_admin::db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to the test database");
    let migrations = Path::new(env!("CARGO_MANIFEST_DIR")).join("../admin/migrations");
    Migrator::new(migrations)
        .await
        .expect("Failed to read migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Some(pool)
}
