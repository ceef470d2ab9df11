//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! sb-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `STOREBOARD_MIGRATIONS` - Migrations directory (default: `crates/admin/migrations`)

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use thiserror::Error;

const DEFAULT_MIGRATIONS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../admin/migrations");

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

fn database_url() -> Result<SecretString, MigrationError> {
    std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("ADMIN_DATABASE_URL"))
}

fn migrations_dir() -> PathBuf {
    std::env::var("STOREBOARD_MIGRATIONS").map_or_else(|_| PathBuf::from(DEFAULT_MIGRATIONS), PathBuf::from)
}

/// Apply every pending migration.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;
    let dir = migrations_dir();

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!(dir = %dir.display(), "Running migrations...");
    let migrator = Migrator::new(dir).await?;
    migrator.run(&pool).await?;

    tracing::info!(count = migrator.iter().count(), "Migrations complete!");
    Ok(())
}
