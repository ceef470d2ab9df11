//! Size repository.

use sqlx::PgPool;

use storeboard_core::forms::SizeInput;
use storeboard_core::{SizeId, StoreId};

use super::RepositoryError;
use crate::models::Size;

const COLUMNS: &str = "id, store_id, name, value, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct SizeRow {
    id: SizeId,
    store_id: StoreId,
    name: String,
    value: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<SizeRow> for Size {
    fn from(row: SizeRow) -> Self {
        Self {
            id: row.id,
            store_id: row.store_id,
            name: row.name,
            value: row.value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for size database operations.
pub struct SizeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SizeRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's sizes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError> {
        let rows = sqlx::query_as::<_, SizeRow>(&format!(
            "SELECT {COLUMNS} FROM storeboard.size
             WHERE store_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one size of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, store_id: StoreId, id: SizeId) -> Result<Option<Size>, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(&format!(
            "SELECT {COLUMNS} FROM storeboard.size WHERE store_id = $1 AND id = $2"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a size.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, store_id: StoreId, input: &SizeInput) -> Result<Size, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(&format!(
            "INSERT INTO storeboard.size (id, store_id, name, value)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        ))
        .bind(SizeId::generate())
        .bind(store_id)
        .bind(input.name.trim())
        .bind(input.value.trim())
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::on_write)?;

        Ok(row.into())
    }

    /// Update a size.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store has no such size.
    pub async fn update(
        &self,
        store_id: StoreId,
        id: SizeId,
        input: &SizeInput,
    ) -> Result<Size, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(&format!(
            "UPDATE storeboard.size
             SET name = $3, value = $4, updated_at = NOW()
             WHERE store_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(id)
        .bind(input.name.trim())
        .bind(input.value.trim())
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::on_write)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a size.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` while products still use it,
    /// `RepositoryError::NotFound` if the store has no such size.
    pub async fn delete(&self, store_id: StoreId, id: SizeId) -> Result<Size, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(&format!(
            "DELETE FROM storeboard.size
             WHERE store_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::on_delete)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
