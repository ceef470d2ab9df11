//! Color repository.

use sqlx::PgPool;

use storeboard_core::forms::ColorInput;
use storeboard_core::{ColorId, StoreId};

use super::RepositoryError;
use crate::models::Color;

const COLUMNS: &str = "id, store_id, name, value, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ColorRow {
    id: ColorId,
    store_id: StoreId,
    name: String,
    value: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ColorRow> for Color {
    fn from(row: ColorRow) -> Self {
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

/// Repository for color database operations.
pub struct ColorRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ColorRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's colors, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Color>, RepositoryError> {
        let rows = sqlx::query_as::<_, ColorRow>(&format!(
            "SELECT {COLUMNS} FROM storeboard.color
             WHERE store_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one color of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, store_id: StoreId, id: ColorId) -> Result<Option<Color>, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(&format!(
            "SELECT {COLUMNS} FROM storeboard.color WHERE store_id = $1 AND id = $2"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a color.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, store_id: StoreId, input: &ColorInput) -> Result<Color, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(&format!(
            "INSERT INTO storeboard.color (id, store_id, name, value)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        ))
        .bind(ColorId::generate())
        .bind(store_id)
        .bind(input.name.trim())
        .bind(input.value.trim())
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::on_write)?;

        Ok(row.into())
    }

    /// Update a color.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store has no such color.
    pub async fn update(
        &self,
        store_id: StoreId,
        id: ColorId,
        input: &ColorInput,
    ) -> Result<Color, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(&format!(
            "UPDATE storeboard.color
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

    /// Delete a color.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` while products still use it,
    /// `RepositoryError::NotFound` if the store has no such color.
    pub async fn delete(&self, store_id: StoreId, id: ColorId) -> Result<Color, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(&format!(
            "DELETE FROM storeboard.color
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
