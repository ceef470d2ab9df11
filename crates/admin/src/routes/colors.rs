//! Colors: named hex values products are offered in.

use std::collections::HashMap;

use sqlx::PgPool;

use storeboard_core::forms::ColorInput;
use storeboard_core::{ColorId, EntityKind, FieldErrors, StoreId, Validate};

use super::resource::{FormField, FormOptions, Resource, Widget, form_text};
use crate::db::{ColorRepository, RepositoryError};
use crate::models::Color;

pub struct Colors;

impl Resource for Colors {
    const KIND: EntityKind = EntityKind::Color;

    type Id = ColorId;
    type Input = ColorInput;
    type Draft = ColorInput;
    type Record = Color;

    fn prepare(input: &ColorInput) -> Result<ColorInput, FieldErrors> {
        input.validate()?;
        Ok(input.clone())
    }

    async fn list(pool: &PgPool, store_id: StoreId) -> Result<Vec<Color>, RepositoryError> {
        ColorRepository::new(pool).list(store_id).await
    }

    async fn get(pool: &PgPool, store_id: StoreId, id: ColorId) -> Result<Option<Color>, RepositoryError> {
        ColorRepository::new(pool).get(store_id, id).await
    }

    async fn create(pool: &PgPool, store_id: StoreId, draft: &ColorInput) -> Result<Color, RepositoryError> {
        ColorRepository::new(pool).create(store_id, draft).await
    }

    async fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: ColorId,
        draft: &ColorInput,
    ) -> Result<Color, RepositoryError> {
        ColorRepository::new(pool).update(store_id, id, draft).await
    }

    async fn delete(pool: &PgPool, store_id: StoreId, id: ColorId) -> Result<Color, RepositoryError> {
        ColorRepository::new(pool).delete(store_id, id).await
    }

    fn from_form(form: &HashMap<String, String>) -> ColorInput {
        ColorInput {
            name: form_text(form, "name"),
            value: form_text(form, "value"),
        }
    }

    fn fields(input: &ColorInput, _options: &FormOptions) -> Vec<FormField> {
        vec![
            FormField::new(Widget::Text, "name", "Name", &input.name).placeholder("Color name"),
            FormField::new(Widget::Color, "value", "Value", &input.value)
                .placeholder("#000000")
                .swatch(&input.value),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_is_required() {
        let input = ColorInput {
            name: "Green".to_string(),
            value: "00ff00".to_string(),
        };
        assert!(Colors::prepare(&input).is_err());

        let input = ColorInput {
            value: "#00ff00".to_string(),
            ..input
        };
        assert!(Colors::prepare(&input).is_ok());
    }

    #[test]
    fn test_value_field_previews_swatch() {
        let input = ColorInput {
            name: "Green".to_string(),
            value: "#00ff00".to_string(),
        };
        let fields = Colors::fields(&input, &FormOptions::default());
        assert_eq!(
            fields.iter().find(|f| f.name == "value").and_then(|f| f.swatch.as_deref()),
            Some("#00ff00")
        );
    }
}
