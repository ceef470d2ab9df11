//! Store settings: rename, delete and the public API base URL.

use std::collections::HashMap;

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use storeboard_core::api_docs::public_api_url;
use storeboard_core::entity::{GENERIC_FAILURE, store_messages};
use storeboard_core::forms::StoreInput;
use storeboard_core::{ApiRoute, FieldErrors, Validate};

use super::entities::ConfirmTemplate;
use super::page::{PageContext, render, render_with_status};
use super::resource::form_text;
use crate::db::StoreRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireUser, push_flash};
use crate::models::Flash;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub page: PageContext,
    pub action_url: String,
    pub delete_url: String,
    pub name: String,
    pub error: Option<String>,
    pub api_route: ApiRoute,
    pub copied_message: &'static str,
}

fn settings_url(store_id: impl std::fmt::Display) -> String {
    format!("/{store_id}/settings")
}

fn settings_page(
    state: &AppState,
    page: PageContext,
    store_id: storeboard_core::StoreId,
    name: String,
    errors: &FieldErrors,
) -> SettingsTemplate {
    let action_url = settings_url(store_id);
    SettingsTemplate {
        page,
        delete_url: format!("{action_url}/delete"),
        action_url,
        name,
        error: errors.get("name").map(ToString::to_string),
        api_route: public_api_url(&state.config().base_url, store_id),
        copied_message: store_messages::API_COPIED,
    }
}

/// GET /{store_id}/settings
#[instrument(skip(state, session, user_id))]
pub async fn show(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(store_id): Path<String>,
) -> Result<Response, Response> {
    let (page, store) = PageContext::for_store(&state, &user_id, &store_id, &session, uri.path()).await?;
    let template = settings_page(&state, page, store.id, store.name, &FieldErrors::new());
    Ok(render(&template).into_response())
}

/// POST /{store_id}/settings
#[instrument(skip(state, session, user_id, form))]
pub async fn update(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(store_id): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, Response> {
    let (mut page, store) = PageContext::for_store(&state, &user_id, &store_id, &session, uri.path()).await?;
    let input = StoreInput {
        name: form_text(&form, "name"),
    };

    if let Err(errors) = input.validate() {
        let template = settings_page(&state, page, store.id, input.name, &errors);
        return Ok(render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &template));
    }

    match StoreRepository::new(state.pool())
        .rename(store.id, &user_id, &input.name)
        .await
    {
        Ok(store) => {
            tracing::info!(store_id = %store.id, "Store renamed");
            push_flash(&session, Flash::success(store_messages::UPDATED)).await;
            Ok(Redirect::to(&settings_url(store.id)).into_response())
        }
        Err(e) => {
            let status = AppError::from(e).status();
            tracing::warn!(store_id = %store.id, status = %status, "Store rename failed");
            page.flash = Some(Flash::error(GENERIC_FAILURE));
            let template = settings_page(&state, page, store.id, input.name, &FieldErrors::new());
            Ok(render_with_status(status, &template))
        }
    }
}

/// GET /{store_id}/settings/delete
#[instrument(skip(state, session, user_id))]
pub async fn confirm_delete(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(store_id): Path<String>,
) -> Result<Response, Response> {
    let (page, store) = PageContext::for_store(&state, &user_id, &store_id, &session, uri.path()).await?;
    let cancel_url = settings_url(store.id);
    let template = ConfirmTemplate::new(page, format!("{cancel_url}/delete"), cancel_url);
    Ok(render(&template).into_response())
}

/// POST /{store_id}/settings/delete
///
/// Refused while the store still owns catalog rows.
#[instrument(skip(state, session, user_id))]
pub async fn delete(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(store_id): Path<String>,
) -> Result<Response, Response> {
    let (_, store) = PageContext::for_store(&state, &user_id, &store_id, &session, uri.path()).await?;
    match StoreRepository::new(state.pool())
        .delete(store.id, &user_id)
        .await
    {
        Ok(deleted) => {
            tracing::info!(store_id = %deleted.id, "Store deleted");
            push_flash(&session, Flash::success(store_messages::DELETED)).await;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            let status = AppError::from(e).status();
            tracing::warn!(store_id = %store.id, status = %status, "Store delete refused");
            push_flash(&session, Flash::error(store_messages::DELETE_FAILED)).await;
            Ok(Redirect::to(&settings_url(store.id)).into_response())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storeboard_core::StoreId;

    use super::*;

    #[tokio::test]
    async fn test_settings_page_shows_public_api_url() {
        let state = AppState::for_tests();
        let store_id = StoreId::generate();
        let html = settings_page(&state, PageContext::default(), store_id, "Shop".to_string(), &FieldErrors::new())
            .render()
            .unwrap();
        assert!(html.contains(&format!("http://localhost:3001/api/{store_id}")));
        assert!(html.contains("PUBLIC_API_URL"));
        assert!(html.contains(r#"value="Shop""#));
    }
}
