//! Product repository.
//!
//! A product's images live in `storeboard.image`, ordered by `position`. They
//! are written together with the product in one transaction and replaced
//! wholesale on update.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use storeboard_core::forms::{FieldErrors, ProductInput, parse_id_field};
use storeboard_core::{CategoryId, ColorId, ImageId, Price, ProductId, SizeId, StoreId};

use super::RepositoryError;
use crate::models::{Image, Product};

/// A validated product body with its references parsed.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    pub color_id: ColorId,
    pub size_id: SizeId,
    pub is_featured: bool,
    pub is_archived: bool,
    pub image_urls: Vec<String>,
}

impl TryFrom<&ProductInput> for ProductDraft {
    type Error = FieldErrors;

    fn try_from(input: &ProductInput) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let category_id = parse_id_field("categoryId", &input.category_id);
        let color_id = parse_id_field("colorId", &input.color_id);
        let size_id = parse_id_field("sizeId", &input.size_id);

        match (category_id, color_id, size_id) {
            (Ok(category_id), Ok(color_id), Ok(size_id)) => Ok(Self {
                name: input.name.trim().to_string(),
                price: input.price,
                category_id,
                color_id,
                size_id,
                is_featured: input.is_featured,
                is_archived: input.is_archived,
                image_urls: input
                    .images
                    .iter()
                    .map(|image| image.url.trim().to_string())
                    .collect(),
            }),
            (category_id, color_id, size_id) => {
                for failed in [category_id.err(), color_id.err(), size_id.err()]
                    .into_iter()
                    .flatten()
                {
                    for (field, message) in failed.iter() {
                        errors.add(field, message);
                    }
                }
                Err(errors)
            }
        }
    }
}

/// Query filters of the product list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub color_id: Option<ColorId>,
    pub size_id: Option<SizeId>,
    pub is_featured: Option<bool>,
    /// Dashboard lists show archived products; the public API never does.
    #[serde(skip)]
    pub include_archived: bool,
}

impl ProductFilter {
    /// Every product of the store, archived ones included.
    #[must_use]
    pub fn all() -> Self {
        Self {
            include_archived: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    store_id: StoreId,
    category_id: CategoryId,
    color_id: ColorId,
    size_id: SizeId,
    name: String,
    price: Decimal,
    is_featured: bool,
    is_archived: bool,
    category_name: String,
    color_name: String,
    color_value: String,
    size_name: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl ProductRow {
    fn into_product(self, images: Vec<Image>) -> Product {
        Product {
            id: self.id,
            store_id: self.store_id,
            category_id: self.category_id,
            color_id: self.color_id,
            size_id: self.size_id,
            name: self.name,
            price: Price::new(self.price),
            is_featured: self.is_featured,
            is_archived: self.is_archived,
            images,
            category_name: self.category_name,
            color_name: self.color_name,
            color_value: self.color_value,
            size_name: self.size_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    id: ImageId,
    product_id: ProductId,
    url: String,
}

const SELECT: &str = r"
    SELECT p.id, p.store_id, p.category_id, p.color_id, p.size_id, p.name,
           p.price, p.is_featured, p.is_archived,
           c.name AS category_name, k.name AS color_name, k.value AS color_value,
           s.name AS size_name, p.created_at, p.updated_at
    FROM storeboard.product p
    JOIN storeboard.category c ON c.id = p.category_id
    JOIN storeboard.color k ON k.id = p.color_id
    JOIN storeboard.size s ON s.id = p.size_id
";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        store_id: StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT);
        query.push(" WHERE p.store_id = ").push_bind(store_id);
        if !filter.include_archived {
            query.push(" AND p.is_archived = FALSE");
        }
        if let Some(category_id) = filter.category_id {
            query.push(" AND p.category_id = ").push_bind(category_id);
        }
        if let Some(color_id) = filter.color_id {
            query.push(" AND p.color_id = ").push_bind(color_id);
        }
        if let Some(size_id) = filter.size_id {
            query.push(" AND p.size_id = ").push_bind(size_id);
        }
        if let Some(is_featured) = filter.is_featured {
            query.push(" AND p.is_featured = ").push_bind(is_featured);
        }
        query.push(" ORDER BY p.created_at DESC");

        let rows = query
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool)
            .await?;

        let ids: Vec<ProductId> = rows.iter().map(|row| row.id).collect();
        let mut images = self.images_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let product_images = images.remove(&row.id).unwrap_or_default();
                row.into_product(product_images)
            })
            .collect())
    }

    /// Get one product of a store, archived or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT} WHERE p.store_id = $1 AND p.id = $2"
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let images = self.images_for(&[row.id]).await?.remove(&row.id);
        Ok(Some(row.into_product(images.unwrap_or_default())))
    }

    /// Create a product and its images.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the category, color or
    /// size is not in the store.
    pub async fn create(
        &self,
        store_id: StoreId,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        let id = ProductId::generate();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO storeboard.product
                (id, store_id, category_id, color_id, size_id, name, price, is_featured, is_archived)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(id)
        .bind(store_id)
        .bind(draft.category_id)
        .bind(draft.color_id)
        .bind(draft.size_id)
        .bind(&draft.name)
        .bind(draft.price)
        .bind(draft.is_featured)
        .bind(draft.is_archived)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::on_write)?;

        insert_images(&mut tx, id, &draft.image_urls).await?;
        tx.commit().await?;

        tracing::debug!(product_id = %id, images = draft.image_urls.len(), "Product created");
        self.get(store_id, id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Update a product, replacing all of its images.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store has no such product,
    /// `RepositoryError::InvalidReference` for a foreign category, color or size.
    pub async fn update(
        &self,
        store_id: StoreId,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            UPDATE storeboard.product
            SET category_id = $3, color_id = $4, size_id = $5, name = $6, price = $7,
                is_featured = $8, is_archived = $9, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            ",
        )
        .bind(store_id)
        .bind(id)
        .bind(draft.category_id)
        .bind(draft.color_id)
        .bind(draft.size_id)
        .bind(&draft.name)
        .bind(draft.price)
        .bind(draft.is_featured)
        .bind(draft.is_archived)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::on_write)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("DELETE FROM storeboard.image WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_images(&mut tx, id, &draft.image_urls).await?;
        tx.commit().await?;

        self.get(store_id, id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a product and its images.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` while order items reference it,
    /// `RepositoryError::NotFound` if the store has no such product.
    pub async fn delete(&self, store_id: StoreId, id: ProductId) -> Result<Product, RepositoryError> {
        let product = self.get(store_id, id).await?.ok_or(RepositoryError::NotFound)?;

        sqlx::query("DELETE FROM storeboard.product WHERE store_id = $1 AND id = $2")
            .bind(store_id)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(RepositoryError::on_delete)?;

        Ok(product)
    }

    async fn images_for(
        &self,
        ids: &[ProductId],
    ) -> Result<HashMap<ProductId, Vec<Image>>, RepositoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let uuids: Vec<uuid::Uuid> = ids.iter().map(ProductId::as_uuid).collect();
        let rows = sqlx::query_as::<_, ImageRow>(
            r"
            SELECT id, product_id, url
            FROM storeboard.image
            WHERE product_id = ANY($1)
            ORDER BY product_id, position
            ",
        )
        .bind(uuids)
        .fetch_all(self.pool)
        .await?;

        let mut images: HashMap<ProductId, Vec<Image>> = HashMap::new();
        for row in rows {
            images.entry(row.product_id).or_default().push(Image {
                id: row.id,
                url: row.url,
            });
        }
        Ok(images)
    }
}

async fn insert_images(
    tx: &mut Transaction<'_, Postgres>,
    product_id: ProductId,
    urls: &[String],
) -> Result<(), RepositoryError> {
    for (position, url) in urls.iter().enumerate() {
        let position = i32::try_from(position).map_err(|_| {
            RepositoryError::DataCorruption(format!("too many images on product {product_id}"))
        })?;
        sqlx::query(
            r"
            INSERT INTO storeboard.image (id, product_id, url, position)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(ImageId::generate())
        .bind(product_id)
        .bind(url)
        .bind(position)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storeboard_core::forms::ImageInput;

    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            name: "Shirt".to_string(),
            images: vec![
                ImageInput {
                    url: " https://x/a.png ".to_string(),
                },
                ImageInput {
                    url: "https://x/b.png".to_string(),
                },
            ],
            price: Decimal::new(2000, 2),
            category_id: CategoryId::generate().to_string(),
            color_id: ColorId::generate().to_string(),
            size_id: SizeId::generate().to_string(),
            is_featured: true,
            is_archived: false,
        }
    }

    #[test]
    fn test_draft_keeps_image_order() {
        let draft = ProductDraft::try_from(&input()).unwrap();
        assert_eq!(draft.image_urls, vec!["https://x/a.png", "https://x/b.png"]);
        assert!(draft.is_featured);
    }

    #[test]
    fn test_draft_reports_every_bad_reference() {
        let mut input = input();
        input.color_id = "nope".to_string();
        input.size_id = "nope".to_string();
        let errors = ProductDraft::try_from(&input).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.get("colorId").is_some());
        assert!(errors.get("sizeId").is_some());
    }

    #[test]
    fn test_filter_from_query_string() {
        let category_id = CategoryId::generate();
        let filter: ProductFilter = serde_json::from_value(serde_json::json!({
            "categoryId": category_id,
            "isFeatured": true
        }))
        .unwrap();
        assert_eq!(filter.category_id, Some(category_id));
        assert_eq!(filter.is_featured, Some(true));
        assert!(!filter.include_archived);
        assert!(ProductFilter::all().include_archived);
    }
}
