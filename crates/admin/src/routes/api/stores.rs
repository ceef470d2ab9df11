//! Store API: create, rename and delete the signed-in user's stores.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{patch, post},
};
use tracing::instrument;

use storeboard_core::forms::StoreInput;
use storeboard_core::{StoreId, Validate};

use super::entities::parse_path_id;
use crate::db::{RepositoryError, StoreRepository};
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::models::Store;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stores", post(create))
        .route("/api/stores/{store_id}", patch(update).delete(delete))
}

fn store_input(input: Result<Json<StoreInput>, JsonRejection>) -> Result<StoreInput, AppError> {
    let Json(input) = input.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    input.validate()?;
    Ok(input)
}

/// A missing store is indistinguishable from someone else's.
fn not_owned(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::Forbidden("store is not yours".to_string()),
        other => other.into(),
    }
}

#[instrument(skip(state, user_id, input))]
pub async fn create(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    input: Result<Json<StoreInput>, JsonRejection>,
) -> Result<Json<Store>, AppError> {
    let input = store_input(input)?;
    let store = StoreRepository::new(state.pool())
        .create(&user_id, &input.name)
        .await?;
    tracing::info!(store_id = %store.id, "Store created");
    Ok(Json(store))
}

#[instrument(skip(state, user_id, input))]
pub async fn update(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    input: Result<Json<StoreInput>, JsonRejection>,
) -> Result<Json<Store>, AppError> {
    let input = store_input(input)?;
    let store_id: StoreId = parse_path_id(&store_id, "store").map_err(|_| not_owned(RepositoryError::NotFound))?;
    let store = StoreRepository::new(state.pool())
        .rename(store_id, &user_id, &input.name)
        .await
        .map_err(not_owned)?;
    tracing::info!(store_id = %store.id, "Store renamed");
    Ok(Json(store))
}

/// Refused with 409 while the store still owns catalog rows.
#[instrument(skip(state, user_id))]
pub async fn delete(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Store>, AppError> {
    let store_id: StoreId = parse_path_id(&store_id, "store").map_err(|_| not_owned(RepositoryError::NotFound))?;
    let store = StoreRepository::new(state.pool())
        .delete(store_id, &user_id)
        .await
        .map_err(not_owned)?;
    tracing::info!(store_id = %store.id, "Store deleted");
    Ok(Json(store))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::config::DEFAULT_USER_HEADER;

    fn request(method: &str, uri: &str, user: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(user) = user {
            builder = builder.header(DEFAULT_USER_HEADER, user);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_create_requires_user() {
        let app = router().with_state(AppState::for_tests());
        let response = app
            .oneshot(request("POST", "/api/stores", None, r#"{"name":"Shop"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_blank_name_is_bad_request() {
        let app = router().with_state(AppState::for_tests());
        let response = app
            .oneshot(request("POST", "/api/stores", Some("user_1"), r#"{"name":"  "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_store_id_is_forbidden() {
        let app = router().with_state(AppState::for_tests());
        let response = app
            .oneshot(request("DELETE", "/api/stores/nope", Some("user_1"), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_not_owned_mapping() {
        assert!(matches!(not_owned(RepositoryError::NotFound), AppError::Forbidden(_)));
        assert!(matches!(
            not_owned(RepositoryError::Conflict("fk".to_string())),
            AppError::Conflict(_)
        ));
    }
}
