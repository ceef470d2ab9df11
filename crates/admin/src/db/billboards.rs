//! Billboard repository.

use sqlx::PgPool;

use storeboard_core::forms::BillboardInput;
use storeboard_core::{BillboardId, StoreId};

use super::RepositoryError;
use crate::models::Billboard;

const COLUMNS: &str = "id, store_id, label, image_url, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct BillboardRow {
    id: BillboardId,
    store_id: StoreId,
    label: String,
    image_url: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<BillboardRow> for Billboard {
    fn from(row: BillboardRow) -> Self {
        Self {
            id: row.id,
            store_id: row.store_id,
            label: row.label,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for billboard database operations.
pub struct BillboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BillboardRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's billboards, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError> {
        let rows = sqlx::query_as::<_, BillboardRow>(&format!(
            "SELECT {COLUMNS} FROM storeboard.billboard
             WHERE store_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one billboard of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(&format!(
            "SELECT {COLUMNS} FROM storeboard.billboard
             WHERE store_id = $1 AND id = $2"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a billboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: StoreId,
        input: &BillboardInput,
    ) -> Result<Billboard, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(&format!(
            "INSERT INTO storeboard.billboard (id, store_id, label, image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        ))
        .bind(BillboardId::generate())
        .bind(store_id)
        .bind(input.label.trim())
        .bind(input.image_url.trim())
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::on_write)?;

        Ok(row.into())
    }

    /// Update a billboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store has no such billboard.
    pub async fn update(
        &self,
        store_id: StoreId,
        id: BillboardId,
        input: &BillboardInput,
    ) -> Result<Billboard, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(&format!(
            "UPDATE storeboard.billboard
             SET label = $3, image_url = $4, updated_at = NOW()
             WHERE store_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(id)
        .bind(input.label.trim())
        .bind(input.image_url.trim())
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::on_write)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a billboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` while categories still use it,
    /// `RepositoryError::NotFound` if the store has no such billboard.
    pub async fn delete(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Billboard, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(&format!(
            "DELETE FROM storeboard.billboard
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
