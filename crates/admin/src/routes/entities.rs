//! Dashboard pages shared by every [`Resource`]: the searchable list, the
//! create/edit form and the delete confirmation.
//!
//! Mutations follow post/redirect/get: on success a toast is queued in the
//! session and the browser is sent back to the list.

use std::collections::HashMap;

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;

use storeboard_core::entity::GENERIC_FAILURE;
use storeboard_core::table::{TableCell, TableRow};
use storeboard_core::{
    ApiRoute, Editable, EntityKind, FieldErrors, StoreId, Table, api_docs::api_routes_for,
};

use super::page::{PageContext, render, render_with_status, server_error};
use super::resource::{FormField, Resource, with_errors};
use crate::components::{EMPTY_TITLE, HeaderView, TableQuery, headers};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireUser, push_flash};
use crate::models::Flash;
use crate::state::AppState;

/// Path segment that opens an empty create form.
pub const NEW_SEGMENT: &str = "new";

pub fn router<R: Resource>() -> Router<AppState> {
    let collection = R::KIND.collection();
    Router::new()
        .route(&format!("/{{store_id}}/{collection}"), get(index::<R>))
        .route(
            &format!("/{{store_id}}/{collection}/{{id}}"),
            get(edit::<R>).post(save::<R>),
        )
        .route(
            &format!("/{{store_id}}/{collection}/{{id}}/delete"),
            get(confirm_delete::<R>).post(delete::<R>),
        )
}

/// A table row with its action links.
#[derive(Debug, Clone)]
pub struct RowView {
    pub id: String,
    pub cells: Vec<TableCell>,
    pub edit_url: Option<String>,
    pub delete_url: Option<String>,
}

/// List page; also used for the read-only orders table.
#[derive(Template)]
#[template(path = "entities/list.html")]
pub struct ListTemplate {
    pub page: PageContext,
    pub heading: String,
    pub description: String,
    pub new_url: Option<String>,
    pub search_action: String,
    pub search_placeholder: String,
    pub q: String,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub empty_title: String,
    pub copied_message: String,
    pub api_heading: String,
    pub api_routes: Vec<ApiRoute>,
}

#[derive(Template)]
#[template(path = "entities/form.html")]
pub struct FormTemplate {
    pub page: PageContext,
    pub title: String,
    pub description: String,
    pub action_url: String,
    pub submit_label: &'static str,
    pub delete_url: Option<String>,
    pub fields: Vec<FormField>,
}

/// Confirmation before a destructive action.
#[derive(Template)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmTemplate {
    pub page: PageContext,
    pub title: &'static str,
    pub description: &'static str,
    pub action_url: String,
    pub cancel_url: String,
}

impl ConfirmTemplate {
    #[must_use]
    pub fn new(page: PageContext, action_url: String, cancel_url: String) -> Self {
        Self {
            page,
            title: "Are you sure?",
            description: "This action cannot be undone.",
            action_url,
            cancel_url,
        }
    }
}

/// Attach row actions to the formatted rows of an editable entity.
fn row_views(kind: EntityKind, store_id: StoreId, rows: Vec<TableRow>) -> Vec<RowView> {
    rows.into_iter()
        .map(|row| {
            let edit_url = kind.edit_route(store_id, &row.id);
            RowView {
                delete_url: Some(format!("{edit_url}/delete")),
                edit_url: Some(edit_url),
                id: row.id,
                cells: row.cells,
            }
        })
        .collect()
}

/// Load a record by its raw path id. `new`, malformed and unknown ids all
/// mean "no record".
async fn find<R: Resource>(
    state: &AppState,
    store_id: StoreId,
    raw_id: &str,
) -> Result<Option<R::Record>, Response> {
    if raw_id == NEW_SEGMENT {
        return Ok(None);
    }
    let Ok(id) = raw_id.parse::<R::Id>() else {
        return Ok(None);
    };
    R::get(state.pool(), store_id, id)
        .await
        .map_err(|e| server_error(&e))
}

#[instrument(skip(state, session, user_id))]
pub async fn index<R: Resource>(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(store_id): Path<String>,
    Query(query): Query<TableQuery>,
) -> Result<Response, Response> {
    let (page, store) = PageContext::for_store(&state, &user_id, &store_id, &session, uri.path()).await?;
    let records = R::list(state.pool(), store.id)
        .await
        .map_err(|e| server_error(&e))?;

    let table = Table::from_records(&records);
    let list_url = R::KIND.list_route(store.id);
    let rows = table.view(&query.q, query.sort()).into_iter().cloned().collect();
    let template = ListTemplate {
        page,
        heading: table.heading(),
        description: format!("Manage {} for your store", R::KIND.collection()),
        new_url: Some(R::KIND.edit_route(store.id, NEW_SEGMENT)),
        headers: headers(&table.columns, &list_url, &query),
        search_action: list_url,
        search_placeholder: table.search_placeholder(),
        q: query.q.clone(),
        rows: row_views(R::KIND, store.id, rows),
        empty_title: EMPTY_TITLE.to_string(),
        copied_message: R::KIND.copied_message(),
        api_heading: format!("API calls for {}", R::KIND.plural_label()),
        api_routes: api_routes_for(&state.config().base_url, store.id, R::KIND).to_vec(),
    };
    Ok(render(&template).into_response())
}

/// Render the form for `input`, with select options loaded for the store.
#[allow(clippy::too_many_arguments)]
async fn form_page<R: Resource>(
    state: &AppState,
    page: PageContext,
    store_id: StoreId,
    existing: Option<&R::Record>,
    raw_id: &str,
    input: &R::Input,
    errors: &FieldErrors,
    status: StatusCode,
) -> Result<Response, Response> {
    let options = R::load_options(state.pool(), store_id)
        .await
        .map_err(|e| server_error(&e))?;
    let editing = existing.is_some();
    let edit_url = R::KIND.edit_route(store_id, raw_id);
    let template = FormTemplate {
        page,
        title: R::KIND.form_title(editing),
        description: R::KIND.form_description(editing),
        submit_label: EntityKind::form_action(editing),
        delete_url: existing.map(|_| format!("{edit_url}/delete")),
        action_url: edit_url,
        fields: with_errors(R::fields(input, &options), errors),
    };
    Ok(render_with_status(status, &template))
}

#[instrument(skip(state, session, user_id))]
pub async fn edit<R: Resource>(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path((store_id, id)): Path<(String, String)>,
) -> Result<Response, Response> {
    let (page, store) = PageContext::for_store(&state, &user_id, &store_id, &session, uri.path()).await?;
    let existing = find::<R>(&state, store.id, &id).await?;
    let input = existing.as_ref().map(Editable::to_input).unwrap_or_default();
    form_page::<R>(
        &state,
        page,
        store.id,
        existing.as_ref(),
        &id,
        &input,
        &FieldErrors::new(),
        StatusCode::OK,
    )
    .await
}

#[instrument(skip(state, session, user_id, form))]
pub async fn save<R: Resource>(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path((store_id, id)): Path<(String, String)>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, Response> {
    let (mut page, store) = PageContext::for_store(&state, &user_id, &store_id, &session, uri.path()).await?;
    let existing = find::<R>(&state, store.id, &id).await?;
    let editing = existing.as_ref().and(id.parse::<R::Id>().ok());
    let input = R::from_form(&form);

    let draft = match R::prepare(&input) {
        Ok(draft) => draft,
        Err(errors) => {
            return form_page::<R>(
                &state,
                page,
                store.id,
                existing.as_ref(),
                &id,
                &input,
                &errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await;
        }
    };

    let result = match editing {
        Some(record_id) => R::update(state.pool(), store.id, record_id, &draft).await,
        None => R::create(state.pool(), store.id, &draft).await,
    };

    match result {
        Ok(_) => {
            let message = if editing.is_some() {
                R::KIND.updated_message()
            } else {
                R::KIND.created_message()
            };
            tracing::info!(kind = %R::KIND, store_id = %store.id, "{message}");
            push_flash(&session, Flash::success(message)).await;
            Ok(Redirect::to(&R::KIND.list_route(store.id)).into_response())
        }
        Err(e) => {
            let status = AppError::from(e).status();
            tracing::warn!(kind = %R::KIND, store_id = %store.id, status = %status, "Save failed");
            page.flash = Some(Flash::error(GENERIC_FAILURE));
            form_page::<R>(
                &state,
                page,
                store.id,
                existing.as_ref(),
                &id,
                &input,
                &FieldErrors::new(),
                status,
            )
            .await
        }
    }
}

#[instrument(skip(state, session, user_id))]
pub async fn confirm_delete<R: Resource>(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path((store_id, id)): Path<(String, String)>,
) -> Result<Response, Response> {
    let (page, store) = PageContext::for_store(&state, &user_id, &store_id, &session, uri.path()).await?;
    let template = ConfirmTemplate::new(
        page,
        format!("{}/delete", R::KIND.edit_route(store.id, &id)),
        R::KIND.list_route(store.id),
    );
    Ok(render(&template).into_response())
}

/// Delete and return to the list. Any failure, including a refusal while
/// dependents exist, shows the entity's dependency message.
#[instrument(skip(state, session, user_id))]
pub async fn delete<R: Resource>(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path((store_id, id)): Path<(String, String)>,
) -> Result<Response, Response> {
    let (_, store) = PageContext::for_store(&state, &user_id, &store_id, &session, uri.path()).await?;
    let parsed = id.parse::<R::Id>().ok();
    let result = match parsed {
        Some(record_id) => R::delete(state.pool(), store.id, record_id)
            .await
            .map_err(AppError::from),
        None => Err(AppError::NotFound(R::KIND.label().to_lowercase())),
    };

    let flash = match result {
        Ok(_) => {
            tracing::info!(kind = %R::KIND, store_id = %store.id, id = %id, "Record deleted");
            Flash::success(R::KIND.deleted_message())
        }
        Err(e) => {
            tracing::warn!(kind = %R::KIND, store_id = %store.id, id = %id, status = %e.status(), "Delete refused");
            Flash::error(R::KIND.delete_failed_message())
        }
    };
    push_flash(&session, flash).await;
    Ok(Redirect::to(&R::KIND.list_route(store.id)).into_response())
}
