//! Billboards: the hero banners categories are shown under.

use std::collections::HashMap;

use sqlx::PgPool;

use storeboard_core::forms::BillboardInput;
use storeboard_core::{BillboardId, EntityKind, FieldErrors, StoreId, Validate};

use super::resource::{FormField, FormOptions, Resource, Widget, form_text};
use crate::db::{BillboardRepository, RepositoryError};
use crate::models::Billboard;

pub struct Billboards;

impl Resource for Billboards {
    const KIND: EntityKind = EntityKind::Billboard;

    type Id = BillboardId;
    type Input = BillboardInput;
    type Draft = BillboardInput;
    type Record = Billboard;

    fn prepare(input: &BillboardInput) -> Result<BillboardInput, FieldErrors> {
        input.validate()?;
        Ok(input.clone())
    }

    async fn list(pool: &PgPool, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError> {
        BillboardRepository::new(pool).list(store_id).await
    }

    async fn get(
        pool: &PgPool,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        BillboardRepository::new(pool).get(store_id, id).await
    }

    async fn create(
        pool: &PgPool,
        store_id: StoreId,
        draft: &BillboardInput,
    ) -> Result<Billboard, RepositoryError> {
        BillboardRepository::new(pool).create(store_id, draft).await
    }

    async fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: BillboardId,
        draft: &BillboardInput,
    ) -> Result<Billboard, RepositoryError> {
        BillboardRepository::new(pool).update(store_id, id, draft).await
    }

    async fn delete(
        pool: &PgPool,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Billboard, RepositoryError> {
        BillboardRepository::new(pool).delete(store_id, id).await
    }

    fn from_form(form: &HashMap<String, String>) -> BillboardInput {
        BillboardInput {
            label: form_text(form, "label"),
            image_url: form_text(form, "imageUrl"),
        }
    }

    fn fields(input: &BillboardInput, _options: &FormOptions) -> Vec<FormField> {
        vec![
            FormField::new(Widget::Url, "imageUrl", "Background image", &input.image_url)
                .placeholder("https://")
                .description("URL of an image uploaded to the asset host"),
            FormField::new(Widget::Text, "label", "Label", &input.label)
                .placeholder("Billboard label"),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_form_round_trip_keeps_values() {
        let mut form = HashMap::new();
        form.insert("label".to_string(), "Summer".to_string());
        form.insert("imageUrl".to_string(), "https://x/img.png".to_string());
        let input = Billboards::from_form(&form);
        assert!(Billboards::prepare(&input).is_ok());

        let fields = Billboards::fields(&input, &FormOptions::default());
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().any(|f| f.name == "label" && f.value == "Summer"));
    }

    #[test]
    fn test_empty_form_fails_validation() {
        let errors = Billboards::prepare(&Billboards::from_form(&HashMap::new())).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
