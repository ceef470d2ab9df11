//! Store overview: revenue, sales and stock cards plus the monthly chart.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::Uri,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tower_sessions::Session;
use tracing::instrument;

use storeboard_core::{GraphPoint, Price};

use super::page::{PageContext, render, server_error};
use crate::db::DashboardRepository;
use crate::filters;
use crate::middleware::RequireUser;
use crate::state::AppState;

/// One bar of the revenue chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarView {
    pub name: &'static str,
    pub total: String,
    /// Height relative to the tallest bar, 0 to 100.
    pub height: u32,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub page: PageContext,
    pub total_revenue: String,
    pub sales_count: i64,
    pub stock_count: i64,
    pub bars: Vec<BarView>,
}

/// Scale the series so the largest month fills the chart.
#[must_use]
pub fn bars(series: &[GraphPoint]) -> Vec<BarView> {
    let max = series
        .iter()
        .map(|point| point.total)
        .max()
        .unwrap_or(Decimal::ZERO);
    series
        .iter()
        .map(|point| {
            let height = if max > Decimal::ZERO {
                (point.total * Decimal::ONE_HUNDRED / max)
                    .round()
                    .to_u32()
                    .unwrap_or(0)
            } else {
                0
            };
            BarView {
                name: point.name,
                total: Price::new(point.total).display(),
                height,
            }
        })
        .collect()
}

/// GET /{store_id}
#[instrument(skip(state, session, user_id))]
pub async fn overview(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(store_id): Path<String>,
) -> Result<Response, Response> {
    let (page, store) = PageContext::for_store(&state, &user_id, &store_id, &session, uri.path()).await?;
    let summary = DashboardRepository::new(state.pool())
        .summary(store.id)
        .await
        .map_err(|e| server_error(&e))?;

    let template = DashboardTemplate {
        page,
        total_revenue: summary.total_revenue.display(),
        sales_count: summary.sales_count,
        stock_count: summary.stock_count,
        bars: bars(&summary.revenue_series),
    };
    Ok(render(&template).into_response())
}

#[cfg(test)]
mod tests {
    use storeboard_core::revenue::monthly_series;

    use super::*;

    #[test]
    fn test_bars_scale_to_tallest_month() {
        let series = monthly_series([(1, Decimal::new(50, 0)), (3, Decimal::new(200, 0))]);
        let bars = bars(&series);
        assert_eq!(bars.len(), 12);
        let heights: Vec<u32> = bars.iter().take(3).map(|b| b.height).collect();
        assert_eq!(heights, vec![25, 0, 100]);
        assert_eq!(bars.get(2).map(|b| b.total.as_str()), Some("$200.00"));
    }

    #[test]
    fn test_bars_without_revenue_are_flat() {
        let bars = bars(&monthly_series([]));
        assert!(bars.iter().all(|b| b.height == 0 && b.total == "$0.00"));
    }
}
