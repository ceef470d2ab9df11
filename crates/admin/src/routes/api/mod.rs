//! REST API.
//!
//! Catalog reads are public so a storefront can consume them; every mutation
//! requires the store owner. Errors are [`AppError`](crate::error::AppError)
//! JSON bodies.

pub mod entities;
pub mod orders;
pub mod stores;

use axum::Router;
use axum::routing::get;

use crate::routes::billboards::Billboards;
use crate::routes::categories::Categories;
use crate::routes::colors::Colors;
use crate::routes::products::Products;
use crate::routes::resource::Resource;
use crate::routes::sizes::Sizes;
use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(stores::router())
        .merge(entities::router::<Billboards>())
        .merge(entities::router::<Categories>())
        .merge(entities::router::<Colors>())
        .merge(entities::router::<Sizes>())
        .route(
            &format!("/api/{{store_id}}/{}", Products::KIND.collection()),
            get(entities::list_products).post(entities::create::<Products>),
        )
        .merge(entities::item_router::<Products>())
        .route("/api/{store_id}/orders", get(orders::list))
}
