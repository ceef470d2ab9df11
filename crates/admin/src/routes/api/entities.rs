//! Generic CRUD handlers shared by every [`Resource`].
//!
//! | Method | Path                              | Access |
//! |--------|-----------------------------------|--------|
//! | GET    | `/api/{storeId}/{collection}`      | public |
//! | GET    | `/api/{storeId}/{collection}/{id}` | public |
//! | POST   | `/api/{storeId}/{collection}`      | owner  |
//! | PATCH  | `/api/{storeId}/{collection}/{id}` | owner  |
//! | DELETE | `/api/{storeId}/{collection}/{id}` | owner  |
//!
//! Mutations check, in order: a signed-in user (401), a valid body (400),
//! ownership of the store (403).

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::get,
};
use tracing::instrument;

use storeboard_core::{StoreId, UserId};

use crate::db::{ProductFilter, ProductRepository, StoreRepository};
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::{Product, Store};
use crate::routes::resource::Resource;
use crate::state::AppState;

/// Collection and item routes for one resource.
pub fn router<R: Resource>() -> Router<AppState> {
    Router::new()
        .route(
            &format!("/api/{{store_id}}/{}", R::KIND.collection()),
            get(list::<R>).post(create::<R>),
        )
        .merge(item_router::<R>())
}

/// Item routes only; used when the collection GET is specialized.
pub fn item_router<R: Resource>() -> Router<AppState> {
    Router::new().route(
        &format!("/api/{{store_id}}/{}/{{id}}", R::KIND.collection()),
        get(show::<R>).patch(update::<R>).delete(delete::<R>),
    )
}

/// Parse a path id; anything malformed cannot name an existing row.
pub(crate) fn parse_path_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(what.to_string()))
}

/// The store, if the signed-in user owns it.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the store does not exist or belongs to
/// someone else.
pub(crate) async fn require_owned_store(
    state: &AppState,
    store_id: StoreId,
    user_id: &UserId,
) -> Result<Store, AppError> {
    StoreRepository::new(state.pool())
        .get_owned(store_id, user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("store is not yours".to_string()))
}

fn body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(input)| input)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

#[instrument(skip(state))]
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<R::Record>>, AppError> {
    let store_id: StoreId = parse_path_id(&store_id, "store")?;
    Ok(Json(R::list(state.pool(), store_id).await?))
}

/// Public product list. Archived products are never returned; the other
/// filters come from the query string (`categoryId`, `colorId`, `sizeId`,
/// `isFeatured`).
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    let store_id: StoreId = parse_path_id(&store_id, "store")?;
    let filter = ProductFilter {
        include_archived: false,
        ..filter
    };
    Ok(Json(
        ProductRepository::new(state.pool())
            .list(store_id, &filter)
            .await?,
    ))
}

#[instrument(skip(state))]
pub async fn show<R: Resource>(
    State(state): State<AppState>,
    Path((store_id, id)): Path<(String, String)>,
) -> Result<Json<R::Record>, AppError> {
    let label = R::KIND.label().to_lowercase();
    let store_id: StoreId = parse_path_id(&store_id, "store")?;
    let id: R::Id = parse_path_id(&id, &label)?;
    R::get(state.pool(), store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(label))
}

#[instrument(skip(state, user_id, input))]
pub async fn create<R: Resource>(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    input: Result<Json<R::Input>, JsonRejection>,
) -> Result<Json<R::Record>, AppError> {
    let draft = R::prepare(&body(input)?)?;
    let store_id: StoreId =
        parse_path_id(&store_id, "store").map_err(|_| AppError::Forbidden("store".to_string()))?;
    require_owned_store(&state, store_id, &user_id).await?;

    let record = R::create(state.pool(), store_id, &draft).await?;
    tracing::info!(kind = %R::KIND, store_id = %store_id, "Record created");
    Ok(Json(record))
}

#[instrument(skip(state, user_id, input))]
pub async fn update<R: Resource>(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((store_id, id)): Path<(String, String)>,
    input: Result<Json<R::Input>, JsonRejection>,
) -> Result<Json<R::Record>, AppError> {
    let draft = R::prepare(&body(input)?)?;
    let label = R::KIND.label().to_lowercase();
    let store_id: StoreId =
        parse_path_id(&store_id, "store").map_err(|_| AppError::Forbidden("store".to_string()))?;
    require_owned_store(&state, store_id, &user_id).await?;
    let id: R::Id = parse_path_id(&id, &label)?;

    let record = R::update(state.pool(), store_id, id, &draft).await?;
    tracing::info!(kind = %R::KIND, store_id = %store_id, id = %id, "Record updated");
    Ok(Json(record))
}

#[instrument(skip(state, user_id))]
pub async fn delete<R: Resource>(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((store_id, id)): Path<(String, String)>,
) -> Result<Json<R::Record>, AppError> {
    let label = R::KIND.label().to_lowercase();
    let store_id: StoreId =
        parse_path_id(&store_id, "store").map_err(|_| AppError::Forbidden("store".to_string()))?;
    require_owned_store(&state, store_id, &user_id).await?;
    let id: R::Id = parse_path_id(&id, &label)?;

    let record = R::delete(state.pool(), store_id, id).await?;
    tracing::info!(kind = %R::KIND, store_id = %store_id, id = %id, "Record deleted");
    Ok(Json(record))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::config::DEFAULT_USER_HEADER;
    use crate::routes::billboards::Billboards;
    use crate::routes::colors::Colors;

    fn app() -> Router {
        Router::new()
            .merge(router::<Billboards>())
            .merge(router::<Colors>())
            .with_state(AppState::for_tests())
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_mutation_without_user_is_unauthorized() {
        let store_id = StoreId::generate();
        let response = app()
            .oneshot(
                Request::post(format!("/api/{store_id}/billboards"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"label":"Summer","imageUrl":"https://x/a.png"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_body_is_rejected_before_store_lookup() {
        let store_id = StoreId::generate();
        let response = app()
            .oneshot(
                Request::post(format!("/api/{store_id}/colors"))
                    .header(DEFAULT_USER_HEADER, "user_1")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"Green","value":"00ff00"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"errors": {"value": "String must be a valid hex code"}})
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let store_id = StoreId::generate();
        let response = app()
            .oneshot(
                Request::patch(format!("/api/{store_id}/billboards/{}", StoreId::generate()))
                    .header(DEFAULT_USER_HEADER, "user_1")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_item_id_is_not_found() {
        let store_id = StoreId::generate();
        let response = app()
            .oneshot(
                Request::get(format!("/api/{store_id}/billboards/not-an-id"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_parse_path_id() {
        let id = StoreId::generate();
        assert_eq!(parse_path_id::<StoreId>(&id.to_string(), "store").unwrap(), id);
        assert!(matches!(
            parse_path_id::<StoreId>("nope", "store"),
            Err(AppError::NotFound(_))
        ));
    }
}
