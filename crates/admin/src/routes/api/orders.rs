//! Orders API. Orders are placed by the storefront checkout, so the
//! dashboard only reads them, and only the store owner may.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use storeboard_core::StoreId;

use super::entities::{parse_path_id, require_owned_store};
use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::Order;
use crate::state::AppState;

#[instrument(skip(state, user_id))]
pub async fn list(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<Order>>, AppError> {
    let store_id: StoreId =
        parse_path_id(&store_id, "store").map_err(|_| AppError::Forbidden("store".to_string()))?;
    require_owned_store(&state, store_id, &user_id).await?;
    Ok(Json(OrderRepository::new(state.pool()).list(store_id).await?))
}
