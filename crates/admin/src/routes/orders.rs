//! Orders page: a read-only, searchable table of the store's orders.

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use storeboard_core::{EntityKind, Table};

use super::entities::{ListTemplate, RowView};
use super::page::{PageContext, render, server_error};
use crate::components::{EMPTY_TITLE, TableQuery, headers};
use crate::db::OrderRepository;
use crate::middleware::RequireUser;
use crate::state::AppState;

/// GET /{store_id}/orders
#[instrument(skip(state, session, user_id))]
pub async fn index(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(store_id): Path<String>,
    Query(query): Query<TableQuery>,
) -> Result<Response, Response> {
    let (page, store) = PageContext::for_store(&state, &user_id, &store_id, &session, uri.path()).await?;
    let orders = OrderRepository::new(state.pool())
        .list(store.id)
        .await
        .map_err(|e| server_error(&e))?;

    let table = Table::from_records(&orders);
    let list_url = EntityKind::Order.list_route(store.id);
    let rows = table
        .view(&query.q, query.sort())
        .into_iter()
        .map(|row| RowView {
            id: row.id.clone(),
            cells: row.cells.clone(),
            edit_url: None,
            delete_url: None,
        })
        .collect();
    let template = ListTemplate {
        page,
        heading: table.heading(),
        description: "Manage orders for your store".to_string(),
        new_url: None,
        headers: headers(&table.columns, &list_url, &query),
        search_action: list_url,
        search_placeholder: table.search_placeholder(),
        q: query.q.clone(),
        rows,
        empty_title: EMPTY_TITLE.to_string(),
        copied_message: EntityKind::Order.copied_message(),
        api_heading: String::new(),
        api_routes: Vec::new(),
    };
    Ok(render(&template).into_response())
}
