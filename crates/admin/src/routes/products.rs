//! Products: priced catalog items with images, a category, a color and a size.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;

use storeboard_core::forms::{ImageInput, ProductInput};
use storeboard_core::{EntityKind, FieldErrors, ProductId, StoreId, Validate};

use super::resource::{FormField, FormOptions, Resource, SelectOption, Widget, form_flag, form_text};
use crate::db::{
    CategoryRepository, ColorRepository, ProductDraft, ProductFilter, ProductRepository,
    RepositoryError, SizeRepository,
};
use crate::models::Product;

pub struct Products;

impl Resource for Products {
    const KIND: EntityKind = EntityKind::Product;

    type Id = ProductId;
    type Input = ProductInput;
    type Draft = ProductDraft;
    type Record = Product;

    fn prepare(input: &ProductInput) -> Result<ProductDraft, FieldErrors> {
        input.validate()?;
        ProductDraft::try_from(input)
    }

    /// Every product, archived ones included; the public API filters on its own.
    async fn list(pool: &PgPool, store_id: StoreId) -> Result<Vec<Product>, RepositoryError> {
        ProductRepository::new(pool)
            .list(store_id, &ProductFilter::all())
            .await
    }

    async fn get(
        pool: &PgPool,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(pool).get(store_id, id).await
    }

    async fn create(
        pool: &PgPool,
        store_id: StoreId,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        ProductRepository::new(pool).create(store_id, draft).await
    }

    async fn update(
        pool: &PgPool,
        store_id: StoreId,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        ProductRepository::new(pool).update(store_id, id, draft).await
    }

    async fn delete(
        pool: &PgPool,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Product, RepositoryError> {
        ProductRepository::new(pool).delete(store_id, id).await
    }

    /// Images come from a textarea with one URL per line. An unparsable price
    /// reads as zero and fails validation.
    fn from_form(form: &HashMap<String, String>) -> ProductInput {
        ProductInput {
            name: form_text(form, "name"),
            images: form_text(form, "images")
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|url| ImageInput {
                    url: url.to_string(),
                })
                .collect(),
            price: form_text(form, "price").trim().parse().unwrap_or(Decimal::ZERO),
            category_id: form_text(form, "categoryId"),
            color_id: form_text(form, "colorId"),
            size_id: form_text(form, "sizeId"),
            is_featured: form_flag(form, "isFeatured"),
            is_archived: form_flag(form, "isArchived"),
        }
    }

    async fn load_options(pool: &PgPool, store_id: StoreId) -> Result<FormOptions, RepositoryError> {
        let categories = CategoryRepository::new(pool);
        let colors = ColorRepository::new(pool);
        let sizes = SizeRepository::new(pool);
        let (categories, colors, sizes) = tokio::try_join!(
            categories.list(store_id),
            colors.list(store_id),
            sizes.list(store_id),
        )?;
        Ok(FormOptions {
            categories: categories
                .into_iter()
                .map(|c| SelectOption::new(c.id, c.name))
                .collect(),
            colors: colors
                .into_iter()
                .map(|c| SelectOption::new(c.id, c.name))
                .collect(),
            sizes: sizes
                .into_iter()
                .map(|s| SelectOption::new(s.id, s.name))
                .collect(),
            ..FormOptions::default()
        })
    }

    fn fields(input: &ProductInput, options: &FormOptions) -> Vec<FormField> {
        let images = input
            .images
            .iter()
            .map(|image| image.url.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let price = if input.price.is_zero() {
            String::new()
        } else {
            input.price.to_string()
        };

        vec![
            FormField::new(Widget::Textarea, "images", "Images", images)
                .placeholder("https://...")
                .description("One image URL per line."),
            FormField::new(Widget::Text, "name", "Name", &input.name).placeholder("Product name"),
            FormField::new(Widget::Number, "price", "Price", price).placeholder("9.99"),
            FormField::select("categoryId", "Category", &input.category_id, &options.categories)
                .placeholder("Select a category"),
            FormField::select("sizeId", "Size", &input.size_id, &options.sizes)
                .placeholder("Select a size"),
            FormField::select("colorId", "Color", &input.color_id, &options.colors)
                .placeholder("Select a color"),
            FormField::checkbox("isFeatured", "Featured", input.is_featured)
                .description("This product will appear on the home page"),
            FormField::checkbox("isArchived", "Archived", input.is_archived)
                .description("This product will not appear anywhere in the store."),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_from_form_splits_image_lines() {
        let input = Products::from_form(&form(&[
            ("name", "Shirt"),
            ("images", "https://x/a.png\r\n\r\n  https://x/b.png  \n"),
            ("price", "19.50"),
            ("isFeatured", "true"),
        ]));
        let urls: Vec<&str> = input.images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x/a.png", "https://x/b.png"]);
        assert_eq!(input.price, Decimal::new(1950, 2));
        assert!(input.is_featured);
        assert!(!input.is_archived);
    }

    #[test]
    fn test_unparsable_price_fails_validation() {
        let input = Products::from_form(&form(&[("price", "abc")]));
        let errors = Products::prepare(&input).err();
        assert_eq!(
            errors.as_ref().and_then(|e| e.get("price")),
            Some("Price must be at least 1")
        );
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = Products::prepare(&ProductInput::default()).err().unwrap_or_default();
        for field in ["name", "images", "price", "categoryId", "colorId", "sizeId"] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn test_fields_order_and_checkboxes() {
        let input = ProductInput {
            is_archived: true,
            ..ProductInput::default()
        };
        let fields = Products::fields(&input, &FormOptions::default());
        let names: Vec<&str> = fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec!["images", "name", "price", "categoryId", "sizeId", "colorId", "isFeatured", "isArchived"]
        );
        assert_eq!(fields.last().map(|f| f.checked), Some("checked"));
    }
}
