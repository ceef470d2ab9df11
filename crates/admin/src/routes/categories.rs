//! Categories: group products and point at the billboard shown above them.

use std::collections::HashMap;

use sqlx::PgPool;

use storeboard_core::forms::CategoryInput;
use storeboard_core::{CategoryId, EntityKind, FieldErrors, StoreId, Validate};

use super::resource::{FormField, FormOptions, Resource, SelectOption, Widget, form_text};
use crate::db::{BillboardRepository, CategoryDraft, CategoryRepository, RepositoryError};
use crate::models::Category;

pub struct Categories;

impl Resource for Categories {
    const KIND: EntityKind = EntityKind::Category;

    type Id = CategoryId;
    type Input = CategoryInput;
    type Draft = CategoryDraft;
    type Record = Category;

    fn prepare(input: &CategoryInput) -> Result<CategoryDraft, FieldErrors> {
        input.validate()?;
        CategoryDraft::try_from(input)
    }

    async fn list(pool: &PgPool, store_id: StoreId) -> Result<Vec<Category>, RepositoryError> {
        CategoryRepository::new(pool).list(store_id).await
    }

    async fn get(
        pool: &PgPool,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        CategoryRepository::new(pool).get(store_id, id).await
    }

    async fn create(
        pool: &PgPool,
        store_id: StoreId,
        draft: &CategoryDraft,
    ) -> Result<Category, RepositoryError> {
        CategoryRepository::new(pool).create(store_id, draft).await
    }

    async fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Category, RepositoryError> {
        CategoryRepository::new(pool).update(store_id, id, draft).await
    }

    async fn delete(
        pool: &PgPool,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Category, RepositoryError> {
        CategoryRepository::new(pool).delete(store_id, id).await
    }

    fn from_form(form: &HashMap<String, String>) -> CategoryInput {
        CategoryInput {
            name: form_text(form, "name"),
            billboard_id: form_text(form, "billboardId"),
        }
    }

    async fn load_options(pool: &PgPool, store_id: StoreId) -> Result<FormOptions, RepositoryError> {
        let billboards = BillboardRepository::new(pool).list(store_id).await?;
        Ok(FormOptions {
            billboards: billboards
                .into_iter()
                .map(|b| SelectOption::new(b.id, b.label))
                .collect(),
            ..FormOptions::default()
        })
    }

    fn fields(input: &CategoryInput, options: &FormOptions) -> Vec<FormField> {
        vec![
            FormField::new(Widget::Text, "name", "Name", &input.name).placeholder("Category name"),
            FormField::select("billboardId", "Billboard", &input.billboard_id, &options.billboards)
                .placeholder("Select a billboard"),
        ]
    }
}
