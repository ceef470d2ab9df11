//! Entity kinds and everything derived from them: route segments, table
//! search keys and the notification texts shown after each operation.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Notification shown when a create or update call fails.
pub const GENERIC_FAILURE: &str = "Something went wrong.";

/// A store-scoped entity managed through the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Billboard,
    Category,
    Color,
    Size,
    Product,
    Order,
}

impl EntityKind {
    /// Every kind, in navigation order.
    pub const ALL: [Self; 6] = [
        Self::Billboard,
        Self::Category,
        Self::Color,
        Self::Size,
        Self::Product,
        Self::Order,
    ];

    /// Kinds that can be created, edited and deleted from the dashboard.
    pub const EDITABLE: [Self; 5] = [
        Self::Billboard,
        Self::Category,
        Self::Color,
        Self::Size,
        Self::Product,
    ];

    /// Collection path segment (`/api/{storeId}/{collection}`).
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Billboard => "billboards",
            Self::Category => "categories",
            Self::Color => "colors",
            Self::Size => "sizes",
            Self::Product => "products",
            Self::Order => "orders",
        }
    }

    /// Name of the item id route parameter (`billboardId`, ...).
    #[must_use]
    pub const fn id_param(self) -> &'static str {
        match self {
            Self::Billboard => "billboardId",
            Self::Category => "categoryId",
            Self::Color => "colorId",
            Self::Size => "sizeId",
            Self::Product => "productId",
            Self::Order => "orderId",
        }
    }

    /// Singular display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Billboard => "Billboard",
            Self::Category => "Category",
            Self::Color => "Color",
            Self::Size => "Size",
            Self::Product => "Product",
            Self::Order => "Order",
        }
    }

    /// Plural display name, used in list headings.
    #[must_use]
    pub const fn plural_label(self) -> &'static str {
        match self {
            Self::Billboard => "Billboards",
            Self::Category => "Categories",
            Self::Color => "Colors",
            Self::Size => "Sizes",
            Self::Product => "Products",
            Self::Order => "Orders",
        }
    }

    /// Column the list table searches on.
    #[must_use]
    pub const fn search_key(self) -> &'static str {
        match self {
            Self::Billboard => "label",
            Self::Order => "products",
            Self::Category | Self::Color | Self::Size | Self::Product => "name",
        }
    }

    /// Whether the dashboard can mutate this kind.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        !matches!(self, Self::Order)
    }

    /// Toast after a successful create.
    #[must_use]
    pub fn created_message(self) -> String {
        format!("{} created", self.label())
    }

    /// Toast after a successful update.
    #[must_use]
    pub fn updated_message(self) -> String {
        format!("{} updated", self.label())
    }

    /// Toast after a successful delete.
    #[must_use]
    pub fn deleted_message(self) -> String {
        format!("{} deleted.", self.label())
    }

    /// Heading of the form for this kind (`Create size` / `Edit size`).
    #[must_use]
    pub fn form_title(self, editing: bool) -> String {
        let label = self.label().to_lowercase();
        if editing {
            format!("Edit {label}")
        } else {
            format!("Create {label}")
        }
    }

    /// Sub-heading of the form.
    #[must_use]
    pub fn form_description(self, editing: bool) -> String {
        let label = self.label().to_lowercase();
        if editing {
            format!("Edit a {label}.")
        } else {
            format!("Add a new {label}")
        }
    }

    /// Submit button caption.
    #[must_use]
    pub const fn form_action(editing: bool) -> &'static str {
        if editing { "Save changes" } else { "Create" }
    }

    /// Toast after copying a row id.
    #[must_use]
    pub fn copied_message(self) -> String {
        format!("{} ID copied to clipboard.", self.label())
    }

    /// Toast when a delete is refused, usually because dependents still
    /// reference the row.
    #[must_use]
    pub const fn delete_failed_message(self) -> &'static str {
        match self {
            Self::Billboard => "Make sure you removed all categories using this billboard first.",
            Self::Category => "Make sure you removed all products using this category first.",
            Self::Color => "Make sure you removed all products using this color first.",
            Self::Size => "Make sure you removed all products using this size first.",
            Self::Product | Self::Order => GENERIC_FAILURE,
        }
    }

    /// Dashboard route of the list page (`/{storeId}/{collection}`).
    #[must_use]
    pub fn list_route(self, store_id: impl fmt::Display) -> String {
        format!("/{store_id}/{}", self.collection())
    }

    /// Dashboard route of the edit page for one row.
    #[must_use]
    pub fn edit_route(self, store_id: impl fmt::Display, id: impl fmt::Display) -> String {
        format!("/{store_id}/{}/{id}", self.collection())
    }

    /// REST path of the collection (`/api/{storeId}/{collection}`).
    #[must_use]
    pub fn api_collection_path(self, store_id: impl fmt::Display) -> String {
        format!("/api/{store_id}/{}", self.collection())
    }

    /// REST path of a single item.
    #[must_use]
    pub fn api_item_path(self, store_id: impl fmt::Display, id: impl fmt::Display) -> String {
        format!("/api/{store_id}/{}/{id}", self.collection())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Parses the collection segment (`billboards`, `sizes`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.collection() == s)
            .ok_or_else(|| format!("unknown entity collection: {s}"))
    }
}

/// Notification texts for the store itself (settings page and store modal).
pub mod store_messages {
    /// Toast after saving settings.
    pub const UPDATED: &str = "Store updated.";
    /// Toast after deleting the store.
    pub const DELETED: &str = "Store deleted.";
    /// Toast when the store still owns rows.
    pub const DELETE_FAILED: &str = "Make sure you removed all products and categories first.";
    /// Toast after copying the public API url.
    pub const API_COPIED: &str = "API Route copied to clipboard.";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        let kind = EntityKind::Billboard;
        assert_eq!(kind.list_route("s1"), "/s1/billboards");
        assert_eq!(kind.edit_route("s1", "b1"), "/s1/billboards/b1");
        assert_eq!(kind.api_collection_path("s1"), "/api/s1/billboards");
        assert_eq!(kind.api_item_path("s1", "b1"), "/api/s1/billboards/b1");
    }

    #[test]
    fn test_messages() {
        assert_eq!(EntityKind::Billboard.created_message(), "Billboard created");
        assert_eq!(EntityKind::Size.updated_message(), "Size updated");
        assert_eq!(EntityKind::Color.deleted_message(), "Color deleted.");
        assert_eq!(
            EntityKind::Category.copied_message(),
            "Category ID copied to clipboard."
        );
    }

    #[test]
    fn test_dependency_messages_differ_from_generic_where_dependents_exist() {
        for kind in [
            EntityKind::Billboard,
            EntityKind::Category,
            EntityKind::Color,
            EntityKind::Size,
        ] {
            assert_ne!(kind.delete_failed_message(), GENERIC_FAILURE);
        }
        assert_eq!(EntityKind::Product.delete_failed_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_form_copy() {
        assert_eq!(EntityKind::Billboard.form_title(false), "Create billboard");
        assert_eq!(EntityKind::Size.form_title(true), "Edit size");
        assert_eq!(EntityKind::Color.form_description(true), "Edit a color.");
        assert_eq!(EntityKind::Product.form_description(false), "Add a new product");
        assert_eq!(EntityKind::form_action(true), "Save changes");
    }

    #[test]
    fn test_search_keys() {
        assert_eq!(EntityKind::Billboard.search_key(), "label");
        assert_eq!(EntityKind::Order.search_key(), "products");
        assert_eq!(EntityKind::Product.search_key(), "name");
    }

    #[test]
    fn test_parse_collection() {
        assert_eq!(
            "categories".parse::<EntityKind>().unwrap(),
            EntityKind::Category
        );
        assert!("widgets".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_orders_are_read_only() {
        assert!(!EntityKind::Order.is_editable());
        assert!(EntityKind::EDITABLE.iter().all(|k| k.is_editable()));
    }
}
