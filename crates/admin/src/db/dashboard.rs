//! Dashboard aggregates.
//!
//! Revenue counts `quantity * price` of every item of a paid order, at the
//! product's current price.

use rust_decimal::Decimal;
use sqlx::PgPool;

use storeboard_core::revenue::{GraphPoint, monthly_series};
use storeboard_core::{Price, StoreId};

use super::RepositoryError;

/// The four figures on the store overview.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_revenue: Price,
    pub sales_count: i64,
    pub stock_count: i64,
    pub revenue_series: Vec<GraphPoint>,
}

/// Repository for dashboard aggregate queries.
pub struct DashboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Sum of `quantity * price` over the store's paid orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn total_revenue(&self, store_id: StoreId) -> Result<Price, RepositoryError> {
        let total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(oi.quantity * p.price), 0)
            FROM storeboard."order" o
            JOIN storeboard.order_item oi ON oi.order_id = o.id
            JOIN storeboard.product p ON p.id = oi.product_id
            WHERE o.store_id = $1 AND o.is_paid
            "#,
        )
        .bind(store_id)
        .fetch_one(self.pool)
        .await?;

        Ok(Price::new(total))
    }

    /// Number of paid orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn sales_count(&self, store_id: StoreId) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM storeboard."order" WHERE store_id = $1 AND is_paid"#,
        )
        .bind(store_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Number of products that are not archived.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stock_count(&self, store_id: StoreId) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM storeboard.product WHERE store_id = $1 AND NOT is_archived",
        )
        .bind(store_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    /// Paid revenue per calendar month, every year folded into one series.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn revenue_series(&self, store_id: StoreId) -> Result<Vec<GraphPoint>, RepositoryError> {
        let rows: Vec<(i32, Decimal)> = sqlx::query_as(
            r#"
            SELECT EXTRACT(MONTH FROM o.created_at)::INT4 AS month,
                   COALESCE(SUM(oi.quantity * p.price), 0) AS total
            FROM storeboard."order" o
            JOIN storeboard.order_item oi ON oi.order_id = o.id
            JOIN storeboard.product p ON p.id = oi.product_id
            WHERE o.store_id = $1 AND o.is_paid
            GROUP BY month
            "#,
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(monthly_series(rows.into_iter().filter_map(|(month, total)| {
            u32::try_from(month).ok().map(|month| (month, total))
        })))
    }

    /// All four figures.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn summary(&self, store_id: StoreId) -> Result<DashboardSummary, RepositoryError> {
        let (total_revenue, sales_count, stock_count, revenue_series) = tokio::try_join!(
            self.total_revenue(store_id),
            self.sales_count(store_id),
            self.stock_count(store_id),
            self.revenue_series(store_id),
        )?;

        Ok(DashboardSummary {
            total_revenue,
            sales_count,
            stock_count,
            revenue_series,
        })
    }
}
