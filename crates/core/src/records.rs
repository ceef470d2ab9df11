//! Records as the REST API serves them, with their table rows.
//!
//! The server builds these from database rows; the client reads them back
//! from JSON. Both render tables through [`ListRecord`] and pre-fill edit
//! forms through [`Editable`], so a column looks the same everywhere.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::forms::{
    BillboardInput, CategoryInput, ColorInput, EntityInput, ImageInput, ProductInput, SizeInput,
};
use crate::table::{Column, ListRecord, TableCell, TableRow};
use crate::types::{
    BillboardId, CategoryId, ColorId, ImageId, OrderId, OrderItemId, Price, ProductId, SizeId,
    StoreId, UserId,
};

/// A record an edit form can be pre-filled from.
pub trait Editable {
    type Input: EntityInput;

    fn to_input(&self) -> Self::Input;
}

/// A store, the root every other entity is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: BillboardId,
    pub store_id: StoreId,
    pub label: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListRecord for Billboard {
    const KIND: EntityKind = EntityKind::Billboard;

    fn columns() -> Vec<Column> {
        vec![Column::new("label", "Label"), Column::new("createdAt", "Date")]
    }

    fn row(&self) -> TableRow {
        TableRow::new(
            self.id,
            vec![TableCell::text(&self.label), TableCell::created(self.created_at)],
        )
    }
}

impl Editable for Billboard {
    type Input = BillboardInput;

    fn to_input(&self) -> BillboardInput {
        BillboardInput {
            label: self.label.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// A category with the label of the billboard it is shown under.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub store_id: StoreId,
    pub billboard_id: BillboardId,
    pub billboard_label: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListRecord for Category {
    const KIND: EntityKind = EntityKind::Category;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("billboardLabel", "Billboard"),
            Column::new("createdAt", "Date"),
        ]
    }

    fn row(&self) -> TableRow {
        TableRow::new(
            self.id,
            vec![
                TableCell::text(&self.name),
                TableCell::text(&self.billboard_label),
                TableCell::created(self.created_at),
            ],
        )
    }
}

impl Editable for Category {
    type Input = CategoryInput;

    fn to_input(&self) -> CategoryInput {
        CategoryInput {
            name: self.name.clone(),
            billboard_id: self.billboard_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: ColorId,
    pub store_id: StoreId,
    pub name: String,
    /// Hex code, including the leading `#`.
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListRecord for Color {
    const KIND: EntityKind = EntityKind::Color;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("value", "Value"),
            Column::new("createdAt", "Date"),
        ]
    }

    fn row(&self) -> TableRow {
        TableRow::new(
            self.id,
            vec![
                TableCell::text(&self.name),
                TableCell::text(&self.value).with_swatch(&self.value),
                TableCell::created(self.created_at),
            ],
        )
    }
}

impl Editable for Color {
    type Input = ColorInput;

    fn to_input(&self) -> ColorInput {
        ColorInput {
            name: self.name.clone(),
            value: self.value.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: SizeId,
    pub store_id: StoreId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListRecord for Size {
    const KIND: EntityKind = EntityKind::Size;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("value", "Value"),
            Column::new("createdAt", "Date"),
        ]
    }

    fn row(&self) -> TableRow {
        TableRow::new(
            self.id,
            vec![
                TableCell::text(&self.name),
                TableCell::text(&self.value),
                TableCell::created(self.created_at),
            ],
        )
    }
}

impl Editable for Size {
    type Input = SizeInput;

    fn to_input(&self) -> SizeInput {
        SizeInput {
            name: self.name.clone(),
            value: self.value.clone(),
        }
    }
}

/// A product image URL hosted by the asset host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub url: String,
}

/// A product with its images and the names of the rows it references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub category_id: CategoryId,
    pub color_id: ColorId,
    pub size_id: SizeId,
    pub name: String,
    pub price: Price,
    pub is_featured: bool,
    pub is_archived: bool,
    #[serde(default)]
    pub images: Vec<Image>,
    pub category_name: String,
    pub color_name: String,
    pub color_value: String,
    pub size_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListRecord for Product {
    const KIND: EntityKind = EntityKind::Product;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("isArchived", "Archived"),
            Column::new("isFeatured", "Featured"),
            Column::new("price", "Price"),
            Column::new("category", "Category"),
            Column::new("size", "Size"),
            Column::new("color", "Color"),
            Column::new("createdAt", "Date"),
        ]
    }

    fn row(&self) -> TableRow {
        TableRow::new(
            self.id,
            vec![
                TableCell::text(&self.name),
                TableCell::flag(self.is_archived),
                TableCell::flag(self.is_featured),
                TableCell::number(self.price.display(), self.price.amount()),
                TableCell::text(&self.category_name),
                TableCell::text(&self.size_name),
                TableCell::text(&self.color_value).with_swatch(&self.color_value),
                TableCell::created(self.created_at),
            ],
        )
    }
}

impl Editable for Product {
    type Input = ProductInput;

    fn to_input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            images: self
                .images
                .iter()
                .map(|image| ImageInput {
                    url: image.url.clone(),
                })
                .collect(),
            price: self.price.amount(),
            category_id: self.category_id.to_string(),
            color_id: self.color_id.to_string(),
            size_id: self.size_id.to_string(),
            is_featured: self.is_featured,
            is_archived: self.is_archived,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    /// Current price of the product.
    pub price: Price,
}

impl OrderItem {
    /// `quantity * price`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(self.price.amount() * Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub store_id: StoreId,
    pub is_paid: bool,
    pub phone: String,
    pub address: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sum of the line totals.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Product names, comma-joined, in item order.
    #[must_use]
    pub fn product_names(&self) -> String {
        self.items
            .iter()
            .map(|item| item.product_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ListRecord for Order {
    const KIND: EntityKind = EntityKind::Order;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("products", "Products"),
            Column::new("phone", "Phone"),
            Column::new("address", "Address"),
            Column::new("totalPrice", "Total price"),
            Column::new("isPaid", "Paid"),
            Column::new("createdAt", "Date"),
        ]
    }

    fn row(&self) -> TableRow {
        let total = self.total_price();
        TableRow::new(
            self.id,
            vec![
                TableCell::text(self.product_names()),
                TableCell::text(&self.phone),
                TableCell::text(&self.address),
                TableCell::number(total.display(), total.amount()),
                TableCell::flag(self.is_paid),
                TableCell::created(self.created_at),
            ],
        )
    }
}
