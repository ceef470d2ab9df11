//! Store setup: the landing route and the create-store form.
//!
//! A signed-in user with at least one store lands on their first store's
//! overview. A user without one is held on the create-store form until they
//! create a store.

use std::collections::HashMap;

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use storeboard_core::entity::GENERIC_FAILURE;
use storeboard_core::forms::StoreInput;
use storeboard_core::{FieldErrors, Validate};

use super::page::{PageContext, render, render_with_status, server_error};
use super::resource::form_text;
use crate::db::StoreRepository;
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::Flash;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/stores/new", get(new_store))
        .route("/stores", post(create_store))
}

/// The create-store form.
#[derive(Template)]
#[template(path = "setup.html")]
pub struct SetupTemplate {
    pub page: PageContext,
    pub name: String,
    pub error: Option<String>,
    /// Where "Cancel" goes; absent while the user has no store to return to.
    pub cancel_url: Option<String>,
}

/// GET /
#[instrument(skip(state, session, user_id))]
pub async fn index(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    match StoreRepository::new(state.pool()).first_for_user(&user_id).await {
        Ok(Some(store)) => Redirect::to(&format!("/{}", store.id)).into_response(),
        Ok(None) => render(&SetupTemplate {
            page: PageContext::bare(&user_id, &session).await,
            name: String::new(),
            error: None,
            cancel_url: None,
        })
        .into_response(),
        Err(e) => server_error(&e),
    }
}

/// GET /stores/new, opened from the store switcher.
#[instrument(skip(state, session, user_id))]
pub async fn new_store(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    match StoreRepository::new(state.pool()).first_for_user(&user_id).await {
        Ok(first) => render(&SetupTemplate {
            page: PageContext::bare(&user_id, &session).await,
            name: String::new(),
            error: None,
            cancel_url: first.map(|store| format!("/{}", store.id)),
        })
        .into_response(),
        Err(e) => server_error(&e),
    }
}

/// POST /stores
#[instrument(skip(state, session, user_id, form))]
pub async fn create_store(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let input = StoreInput {
        name: form_text(&form, "name"),
    };
    let repo = StoreRepository::new(state.pool());

    let (errors, flash, status) = match input.validate() {
        Err(errors) => (errors, None, StatusCode::UNPROCESSABLE_ENTITY),
        Ok(()) => match repo.create(&user_id, &input.name).await {
            Ok(store) => {
                tracing::info!(store_id = %store.id, "Store created");
                return Redirect::to(&format!("/{}", store.id)).into_response();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create store");
                (
                    FieldErrors::new(),
                    Some(Flash::error(GENERIC_FAILURE)),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
        },
    };

    let cancel_url = repo
        .first_for_user(&user_id)
        .await
        .ok()
        .flatten()
        .map(|store| format!("/{}", store.id));
    let mut page = PageContext::bare(&user_id, &session).await;
    page.flash = flash;
    render_with_status(
        status,
        &SetupTemplate {
            page,
            error: errors.get("name").map(ToString::to_string),
            name: input.name,
            cancel_url,
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_anonymous_landing_redirects_to_sign_in() {
        let app = router().with_state(AppState::for_tests());
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/sign-in");
    }

    #[test]
    fn test_setup_renders_without_cancel() {
        let html = SetupTemplate {
            page: PageContext::default(),
            name: String::new(),
            error: Some("Name is required".to_string()),
            cancel_url: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("Create store"));
        assert!(html.contains("Name is required"));
        assert!(!html.contains("Cancel"));
    }
}
