//! Order repository.
//!
//! Orders are written by the storefront checkout; the dashboard only reads
//! them.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;

use storeboard_core::{OrderId, OrderItemId, Price, ProductId, StoreId};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    store_id: StoreId,
    is_paid: bool,
    phone: String,
    address: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: OrderItemId,
    order_id: OrderId,
    product_id: ProductId,
    product_name: String,
    quantity: i32,
    price: Decimal,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's orders with their items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, store_id, is_paid, phone, address, created_at, updated_at
            FROM storeboard."order"
            WHERE store_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name,
                   oi.quantity, p.price
            FROM storeboard.order_item oi
            JOIN storeboard."order" o ON o.id = oi.order_id
            JOIN storeboard.product p ON p.id = oi.product_id
            WHERE o.store_id = $1
            ORDER BY oi.order_id, p.name
            "#,
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        let mut by_order: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(OrderItem {
                id: item.id,
                product_id: item.product_id,
                product_name: item.product_name,
                quantity: item.quantity,
                price: Price::new(item.price),
            });
        }

        Ok(orders
            .into_iter()
            .map(|row| Order {
                items: by_order.remove(&row.id).unwrap_or_default(),
                id: row.id,
                store_id: row.store_id,
                is_paid: row.is_paid,
                phone: row.phone,
                address: row.address,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
            .collect())
    }
}
