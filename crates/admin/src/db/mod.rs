//! Database operations for the dashboard `PostgreSQL`.
//!
//! # Schema: `storeboard`
//!
//! ## Tables
//!
//! - `store` - Stores, owned by an identity-provider user id
//! - `billboard`, `category`, `color`, `size` - Store-scoped catalog entities
//! - `product` / `image` - Products and their ordered image URLs
//! - `order` / `order_item` - Orders (read-only from the dashboard)
//! - `session` - Flash toast sessions
//!
//! Child rows reference `(store_id, parent_id)` with `ON DELETE RESTRICT`, so a
//! parent delete while dependents exist fails with a foreign key violation that
//! the repositories report as [`RepositoryError::Conflict`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p storeboard-cli -- migrate
//! ```

pub mod billboards;
pub mod categories;
pub mod colors;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod sizes;
pub mod stores;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use billboards::BillboardRepository;
pub use categories::{CategoryDraft, CategoryRepository};
pub use colors::ColorRepository;
pub use dashboard::DashboardRepository;
pub use orders::OrderRepository;
pub use products::{ProductDraft, ProductFilter, ProductRepository};
pub use sizes::SizeRepository;
pub use stores::StoreRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Row is still referenced by dependents.
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Input references a row that does not exist in the store.
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}

impl RepositoryError {
    /// Classify an error raised by an `INSERT` or `UPDATE`.
    ///
    /// A foreign key violation there means the body pointed at a row that is
    /// missing or belongs to another store.
    pub(crate) fn on_write(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_foreign_key_violation()
        {
            let constraint = db_err.constraint().unwrap_or("foreign key").to_string();
            return Self::InvalidReference(constraint);
        }
        Self::Database(e)
    }

    /// Classify an error raised by a `DELETE`.
    ///
    /// A foreign key violation there means dependents still reference the row.
    pub(crate) fn on_delete(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_foreign_key_violation()
        {
            let constraint = db_err.constraint().unwrap_or("foreign key").to_string();
            return Self::Conflict(constraint);
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
