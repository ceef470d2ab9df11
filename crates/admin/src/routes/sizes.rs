//! Sizes: named values such as `Small` / `S`.

use std::collections::HashMap;

use sqlx::PgPool;

use storeboard_core::forms::SizeInput;
use storeboard_core::{EntityKind, FieldErrors, SizeId, StoreId, Validate};

use super::resource::{FormField, FormOptions, Resource, Widget, form_text};
use crate::db::{RepositoryError, SizeRepository};
use crate::models::Size;

pub struct Sizes;

impl Resource for Sizes {
    const KIND: EntityKind = EntityKind::Size;

    type Id = SizeId;
    type Input = SizeInput;
    type Draft = SizeInput;
    type Record = Size;

    fn prepare(input: &SizeInput) -> Result<SizeInput, FieldErrors> {
        input.validate()?;
        Ok(input.clone())
    }

    async fn list(pool: &PgPool, store_id: StoreId) -> Result<Vec<Size>, RepositoryError> {
        SizeRepository::new(pool).list(store_id).await
    }

    async fn get(pool: &PgPool, store_id: StoreId, id: SizeId) -> Result<Option<Size>, RepositoryError> {
        SizeRepository::new(pool).get(store_id, id).await
    }

    async fn create(pool: &PgPool, store_id: StoreId, draft: &SizeInput) -> Result<Size, RepositoryError> {
        SizeRepository::new(pool).create(store_id, draft).await
    }

    async fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: SizeId,
        draft: &SizeInput,
    ) -> Result<Size, RepositoryError> {
        SizeRepository::new(pool).update(store_id, id, draft).await
    }

    async fn delete(pool: &PgPool, store_id: StoreId, id: SizeId) -> Result<Size, RepositoryError> {
        SizeRepository::new(pool).delete(store_id, id).await
    }

    fn from_form(form: &HashMap<String, String>) -> SizeInput {
        SizeInput {
            name: form_text(form, "name"),
            value: form_text(form, "value"),
        }
    }

    fn fields(input: &SizeInput, _options: &FormOptions) -> Vec<FormField> {
        vec![
            FormField::new(Widget::Text, "name", "Name", &input.name).placeholder("Size name"),
            FormField::new(Widget::Text, "value", "Value", &input.value).placeholder("Size value"),
        ]
    }
}
