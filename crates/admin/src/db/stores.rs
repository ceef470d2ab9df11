//! Store repository.
//!
//! Every lookup is keyed by `(id, user_id)`: a store that exists but belongs
//! to someone else is indistinguishable from a missing one.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use storeboard_core::{StoreId, UserId};

use super::RepositoryError;
use crate::models::Store;

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: StoreId,
    name: String,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let user_id = UserId::parse(&row.user_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid user id on store {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the user's stores, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, user_id, created_at, updated_at
            FROM storeboard.store
            WHERE user_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// The user's oldest store, which `/` redirects to.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn first_for_user(&self, user_id: &UserId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, user_id, created_at, updated_at
            FROM storeboard.store
            WHERE user_id = $1
            ORDER BY created_at ASC
            LIMIT 1
            ",
        )
        .bind(user_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a store if it is owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_owned(
        &self,
        id: StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, user_id, created_at, updated_at
            FROM storeboard.store
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a store owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, user_id: &UserId, name: &str) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            INSERT INTO storeboard.store (id, name, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(StoreId::generate())
        .bind(name.trim())
        .bind(user_id.as_str())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Rename a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user owns no such store.
    pub async fn rename(
        &self,
        id: StoreId,
        user_id: &UserId,
        name: &str,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            UPDATE storeboard.store
            SET name = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(user_id.as_str())
        .bind(name.trim())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` while the store still owns rows,
    /// `RepositoryError::NotFound` if the user owns no such store.
    pub async fn delete(&self, id: StoreId, user_id: &UserId) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            DELETE FROM storeboard.store
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(user_id.as_str())
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::on_delete)?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}
