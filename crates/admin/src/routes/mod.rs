//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Liveness check
//! GET  /health/ready                   - Readiness check (database)
//! GET  /sign-in                        - Hand-off to the identity provider
//!
//! # Store setup
//! GET  /                               - First store, or the create-store form
//! GET  /stores/new                     - Create-store form
//! POST /stores                         - Create a store
//!
//! # Store pages (owner only)
//! GET  /{storeId}                      - Overview
//! GET  /{storeId}/{collection}         - List (?q=&sort=&dir=)
//! GET  /{storeId}/{collection}/{id}    - Edit form (`new` for create)
//! POST /{storeId}/{collection}/{id}    - Save
//! GET  /{storeId}/{collection}/{id}/delete  - Confirm delete
//! POST /{storeId}/{collection}/{id}/delete  - Delete
//! GET  /{storeId}/orders               - Orders (read-only)
//! GET  /{storeId}/settings             - Settings
//! POST /{storeId}/settings             - Rename store
//! GET  /{storeId}/settings/delete      - Confirm store delete
//! POST /{storeId}/settings/delete      - Delete store
//!
//! # REST API
//! POST   /api/stores                   - Create store
//! PATCH  /api/stores/{storeId}         - Rename store
//! DELETE /api/stores/{storeId}         - Delete store
//! GET    /api/{storeId}/{collection}   - List (public)
//! GET    /api/{storeId}/{collection}/{id} - Get (public)
//! POST   /api/{storeId}/{collection}   - Create
//! PATCH  /api/{storeId}/{collection}/{id} - Update
//! DELETE /api/{storeId}/{collection}/{id} - Delete
//! GET    /api/{storeId}/orders         - Orders
//! ```
//!
//! `{collection}` is one of `billboards`, `categories`, `colors`, `sizes`,
//! `products`.

pub mod api;
pub mod auth;
pub mod billboards;
pub mod categories;
pub mod colors;
pub mod dashboard;
pub mod entities;
pub mod orders;
pub mod page;
pub mod products;
pub mod resource;
pub mod settings;
pub mod setup;
pub mod sizes;

use axum::{Router, routing::get};

use crate::state::AppState;

use billboards::Billboards;
use categories::Categories;
use colors::Colors;
use products::Products;
use sizes::Sizes;

/// Build the complete router (without health checks and static files).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(api::router())
        .merge(auth::router())
        .merge(setup::router())
        .route("/{store_id}", get(dashboard::overview))
        .merge(entities::router::<Billboards>())
        .merge(entities::router::<Categories>())
        .merge(entities::router::<Colors>())
        .merge(entities::router::<Sizes>())
        .merge(entities::router::<Products>())
        .route("/{store_id}/orders", get(orders::index))
        .route(
            "/{store_id}/settings",
            get(settings::show).post(settings::update),
        )
        .route(
            "/{store_id}/settings/delete",
            get(settings::confirm_delete).post(settings::delete),
        )
}
