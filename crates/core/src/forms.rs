//! Validation schemas for every editable entity.
//!
//! The same structs are the JSON request bodies of the REST API (camelCase
//! keys) and the drafts held by dashboard forms. The client validates before
//! issuing a request; the server validates again before touching the database.
//! Missing keys deserialize to empty values so they surface as field errors
//! rather than as a body that fails to parse.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;

/// Minimum length of a color value (`#fff`).
pub const MIN_COLOR_VALUE_LEN: usize = 4;

/// Field name to message map produced by a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// An empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field. The first message for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_insert_with(|| message.into());
    }

    /// Message recorded for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the collected errors when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn require(&mut self, field: &str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{label} is required"));
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// A form draft that can be checked against its schema.
pub trait Validate {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns one message per failing field.
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// A validated request body for one entity kind.
pub trait EntityInput: Validate + Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The entity this body creates or updates.
    const KIND: EntityKind;
}

/// Parse an id-valued field after validation has established it is present.
///
/// # Errors
///
/// Returns a field error when the value is not a valid id.
pub fn parse_id_field<T: FromStr>(field: &str, value: &str) -> Result<T, FieldErrors> {
    value.trim().parse().map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.add(field, "Invalid id");
        errors
    })
}

// =============================================================================
// Schemas
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BillboardInput {
    pub label: String,
    pub image_url: String,
}

impl Validate for BillboardInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("label", "Label", &self.label);
        errors.require("imageUrl", "Image URL", &self.image_url);
        errors.into_result()
    }
}

impl EntityInput for BillboardInput {
    const KIND: EntityKind = EntityKind::Billboard;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub billboard_id: String,
}

impl Validate for CategoryInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", "Name", &self.name);
        errors.require("billboardId", "Billboard", &self.billboard_id);
        errors.into_result()
    }
}

impl EntityInput for CategoryInput {
    const KIND: EntityKind = EntityKind::Category;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorInput {
    pub name: String,
    pub value: String,
}

impl Validate for ColorInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", "Name", &self.name);
        if self.value.chars().count() < MIN_COLOR_VALUE_LEN {
            errors.add(
                "value",
                format!("Value must contain at least {MIN_COLOR_VALUE_LEN} characters"),
            );
        } else if !self.value.starts_with('#') {
            errors.add("value", "String must be a valid hex code");
        }
        errors.into_result()
    }
}

impl EntityInput for ColorInput {
    const KIND: EntityKind = EntityKind::Color;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SizeInput {
    pub name: String,
    pub value: String,
}

impl Validate for SizeInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", "Name", &self.name);
        errors.require("value", "Value", &self.value);
        errors.into_result()
    }
}

impl EntityInput for SizeInput {
    const KIND: EntityKind = EntityKind::Size;
}

/// One product image as handed back by the asset host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInput {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub images: Vec<ImageInput>,
    pub price: Decimal,
    pub category_id: String,
    pub color_id: String,
    pub size_id: String,
    pub is_featured: bool,
    pub is_archived: bool,
}

impl Validate for ProductInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", "Name", &self.name);
        if self.images.is_empty() {
            errors.add("images", "At least one image is required");
        } else if self.images.iter().any(|image| image.url.trim().is_empty()) {
            errors.add("images", "Image URL cannot be empty");
        }
        if self.price < Decimal::ONE {
            errors.add("price", "Price must be at least 1");
        }
        errors.require("categoryId", "Category", &self.category_id);
        errors.require("colorId", "Color", &self.color_id);
        errors.require("sizeId", "Size", &self.size_id);
        errors.into_result()
    }
}

impl EntityInput for ProductInput {
    const KIND: EntityKind = EntityKind::Product;
}

/// Store name, used both by the store-creation modal and the settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreInput {
    pub name: String,
}

impl Validate for StoreInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", "Name", &self.name);
        errors.into_result()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::BillboardId;

    fn color(value: &str) -> ColorInput {
        ColorInput {
            name: "Green".to_string(),
            value: value.to_string(),
        }
    }

    fn product() -> ProductInput {
        ProductInput {
            name: "Shirt".to_string(),
            images: vec![ImageInput {
                url: "https://x/shirt.png".to_string(),
            }],
            price: Decimal::new(20, 0),
            category_id: "c".to_string(),
            color_id: "k".to_string(),
            size_id: "s".to_string(),
            is_featured: false,
            is_archived: false,
        }
    }

    #[test]
    fn test_billboard_requires_both_fields() {
        let errors = BillboardInput::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("label"), Some("Label is required"));
        assert_eq!(errors.get("imageUrl"), Some("Image URL is required"));
    }

    #[test]
    fn test_billboard_body_uses_camel_case() {
        let input = BillboardInput {
            label: "Summer".to_string(),
            image_url: "https://x/img.png".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"label": "Summer", "imageUrl": "https://x/img.png"})
        );
    }

    #[test]
    fn test_color_requires_leading_hash() {
        let errors = color("00ff00").validate().unwrap_err();
        assert_eq!(errors.get("value"), Some("String must be a valid hex code"));
        assert!(color("#00ff00").validate().is_ok());
    }

    #[test]
    fn test_color_requires_four_characters() {
        assert!(color("#ff").validate().is_err());
        assert!(color("#fff").validate().is_ok());
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let input = SizeInput {
            name: "   ".to_string(),
            value: "XL".to_string(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("value").is_none());
    }

    #[test]
    fn test_product_valid() {
        assert!(product().validate().is_ok());
    }

    #[test]
    fn test_product_price_must_be_at_least_one() {
        let mut input = product();
        input.price = Decimal::new(99, 2);
        assert_eq!(
            input.validate().unwrap_err().get("price"),
            Some("Price must be at least 1")
        );
        input.price = Decimal::ONE;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_product_requires_images_and_references() {
        let mut input = product();
        input.images.clear();
        input.size_id.clear();
        let errors = input.validate().unwrap_err();
        assert!(errors.get("images").is_some());
        assert!(errors.get("sizeId").is_some());
    }

    #[test]
    fn test_product_flags_default_false() {
        let input: ProductInput = serde_json::from_value(json!({
            "name": "Shirt",
            "images": [{"url": "https://x/a.png"}],
            "price": 12,
            "categoryId": "c",
            "colorId": "k",
            "sizeId": "s"
        }))
        .unwrap();
        assert!(!input.is_featured);
        assert!(!input.is_archived);
        assert_eq!(input.price, Decimal::new(12, 0));
    }

    #[test]
    fn test_missing_keys_become_field_errors() {
        let input: BillboardInput = serde_json::from_value(json!({"label": "Summer"})).unwrap();
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get("imageUrl"), Some("Image URL is required"));
        assert!(errors.get("label").is_none());
    }

    #[test]
    fn test_parse_id_field() {
        let id = BillboardId::generate();
        let parsed: BillboardId = parse_id_field("billboardId", &id.to_string()).unwrap();
        assert_eq!(parsed, id);

        let errors = parse_id_field::<BillboardId>("billboardId", "nope").unwrap_err();
        assert_eq!(errors.get("billboardId"), Some("Invalid id"));
    }

    #[test]
    fn test_field_errors_display() {
        let errors = StoreInput::default().validate().unwrap_err();
        assert_eq!(errors.to_string(), "name: Name is required");
    }
}
