//! Category repository.
//!
//! Reads join the billboard so list rows can show its label.

use sqlx::PgPool;

use storeboard_core::forms::{CategoryInput, FieldErrors, parse_id_field};
use storeboard_core::{BillboardId, CategoryId, StoreId};

use super::RepositoryError;
use crate::models::Category;

/// A validated category body with its billboard id parsed.
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub billboard_id: BillboardId,
}

impl TryFrom<&CategoryInput> for CategoryDraft {
    type Error = FieldErrors;

    fn try_from(input: &CategoryInput) -> Result<Self, Self::Error> {
        Ok(Self {
            name: input.name.trim().to_string(),
            billboard_id: parse_id_field("billboardId", &input.billboard_id)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    store_id: StoreId,
    billboard_id: BillboardId,
    billboard_label: String,
    name: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            store_id: row.store_id,
            billboard_id: row.billboard_id,
            billboard_label: row.billboard_label,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT: &str = r"
    SELECT c.id, c.store_id, c.billboard_id, b.label AS billboard_label,
           c.name, c.created_at, c.updated_at
    FROM storeboard.category c
    JOIN storeboard.billboard b ON b.id = c.billboard_id
";

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's categories, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "{SELECT} WHERE c.store_id = $1 ORDER BY c.created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get one category of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "{SELECT} WHERE c.store_id = $1 AND c.id = $2"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the billboard is not in
    /// the store.
    pub async fn create(
        &self,
        store_id: StoreId,
        draft: &CategoryDraft,
    ) -> Result<Category, RepositoryError> {
        let id = CategoryId::generate();
        sqlx::query(
            r"
            INSERT INTO storeboard.category (id, store_id, billboard_id, name)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(id)
        .bind(store_id)
        .bind(draft.billboard_id)
        .bind(&draft.name)
        .execute(self.pool)
        .await
        .map_err(RepositoryError::on_write)?;

        self.get(store_id, id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store has no such category,
    /// `RepositoryError::InvalidReference` if the billboard is not in the store.
    pub async fn update(
        &self,
        store_id: StoreId,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Category, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE storeboard.category
            SET name = $3, billboard_id = $4, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            ",
        )
        .bind(store_id)
        .bind(id)
        .bind(&draft.name)
        .bind(draft.billboard_id)
        .execute(self.pool)
        .await
        .map_err(RepositoryError::on_write)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(store_id, id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` while products still use it,
    /// `RepositoryError::NotFound` if the store has no such category.
    pub async fn delete(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Category, RepositoryError> {
        let category = self.get(store_id, id).await?.ok_or(RepositoryError::NotFound)?;

        sqlx::query("DELETE FROM storeboard.category WHERE store_id = $1 AND id = $2")
            .bind(store_id)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(RepositoryError::on_delete)?;

        Ok(category)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_parses_billboard_id() {
        let billboard_id = BillboardId::generate();
        let input = CategoryInput {
            name: " Shirts ".to_string(),
            billboard_id: billboard_id.to_string(),
        };
        let draft = CategoryDraft::try_from(&input).unwrap();
        assert_eq!(draft.name, "Shirts");
        assert_eq!(draft.billboard_id, billboard_id);
    }

    #[test]
    fn test_draft_rejects_malformed_billboard_id() {
        let input = CategoryInput {
            name: "Shirts".to_string(),
            billboard_id: "abc".to_string(),
        };
        let errors = CategoryDraft::try_from(&input).unwrap_err();
        assert_eq!(errors.get("billboardId"), Some("Invalid id"));
    }
}
