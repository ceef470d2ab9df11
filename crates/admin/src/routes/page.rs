//! Shared page chrome: the store switcher, navigation and toasts.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use storeboard_core::{EntityKind, StoreId, UserId};

use crate::db::StoreRepository;
use crate::middleware::take_flash;
use crate::models::{Flash, Store};
use crate::state::AppState;

/// One navigation link.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: String,
    pub label: &'static str,
    /// `active` when the link points at the current section.
    pub active: &'static str,
}

/// One entry of the store switcher.
#[derive(Debug, Clone)]
pub struct StoreOption {
    pub href: String,
    pub name: String,
    pub selected: &'static str,
}

/// The navbar of pages inside a store.
#[derive(Debug, Clone)]
pub struct StoreNav {
    pub store_id: String,
    pub store_name: String,
    pub stores: Vec<StoreOption>,
    pub links: Vec<NavLink>,
}

/// Data every page layout needs.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub user_id: String,
    pub flash: Option<Flash>,
    pub nav: Option<StoreNav>,
}

impl PageContext {
    /// Chrome for pages outside any store (store setup).
    pub async fn bare(user_id: &UserId, session: &Session) -> Self {
        Self {
            user_id: user_id.to_string(),
            flash: take_flash(session).await,
            nav: None,
        }
    }

    /// Chrome for a page inside a store the user owns.
    ///
    /// # Errors
    ///
    /// Redirects to `/` when the store id is malformed, unknown or owned by
    /// someone else; returns a 500 page if the stores cannot be loaded.
    pub async fn for_store(
        state: &AppState,
        user_id: &UserId,
        raw_store_id: &str,
        session: &Session,
        current_path: &str,
    ) -> Result<(Self, Store), Response> {
        let Ok(store_id) = raw_store_id.parse::<StoreId>() else {
            return Err(Redirect::to("/").into_response());
        };
        let stores = StoreRepository::new(state.pool())
            .list_for_user(user_id)
            .await
            .map_err(|e| server_error(&e))?;
        let Some(store) = stores.iter().find(|s| s.id == store_id).cloned() else {
            return Err(Redirect::to("/").into_response());
        };

        let nav = StoreNav {
            store_id: store.id.to_string(),
            store_name: store.name.clone(),
            stores: stores
                .iter()
                .map(|s| StoreOption {
                    href: format!("/{}", s.id),
                    name: s.name.clone(),
                    selected: if s.id == store_id { "selected" } else { "" },
                })
                .collect(),
            links: nav_links(store_id, current_path),
        };

        Ok((
            Self {
                user_id: user_id.to_string(),
                flash: take_flash(session).await,
                nav: Some(nav),
            },
            store,
        ))
    }
}

/// Overview, the catalog sections, orders and settings, in navbar order.
fn nav_links(store_id: StoreId, current_path: &str) -> Vec<NavLink> {
    let overview = format!("/{store_id}");
    let mut links = vec![(overview.clone(), "Overview")];
    links.extend(
        [
            EntityKind::Billboard,
            EntityKind::Category,
            EntityKind::Size,
            EntityKind::Color,
            EntityKind::Product,
            EntityKind::Order,
        ]
        .into_iter()
        .map(|kind| (kind.list_route(store_id), kind.plural_label())),
    );
    links.push((format!("/{store_id}/settings"), "Settings"));

    links
        .into_iter()
        .map(|(href, label)| {
            let active = if href == overview {
                current_path == overview
            } else {
                current_path == href || current_path.starts_with(&format!("{href}/"))
            };
            NavLink {
                href,
                label,
                active: if active { "active" } else { "" },
            }
        })
        .collect()
}

/// Render a template, logging render failures.
pub fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Render a template with a non-200 status.
pub fn render_with_status<T: Template>(status: StatusCode, template: &T) -> Response {
    (status, render(template)).into_response()
}

/// Plain 500 page for failures a page cannot recover from.
pub fn server_error(err: &dyn std::fmt::Display) -> Response {
    tracing::error!(error = %err, "Page request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(links: &[NavLink]) -> Vec<&str> {
        links
            .iter()
            .filter(|l| !l.active.is_empty())
            .map(|l| l.label)
            .collect()
    }

    #[test]
    fn test_nav_order() {
        let store_id = StoreId::generate();
        let labels: Vec<&str> = nav_links(store_id, "/").iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            vec![
                "Overview",
                "Billboards",
                "Categories",
                "Sizes",
                "Colors",
                "Products",
                "Orders",
                "Settings"
            ]
        );
    }

    #[test]
    fn test_nav_marks_current_section() {
        let store_id = StoreId::generate();
        assert_eq!(active(&nav_links(store_id, &format!("/{store_id}"))), vec!["Overview"]);
        assert_eq!(
            active(&nav_links(store_id, &format!("/{store_id}/billboards/new"))),
            vec!["Billboards"]
        );
        assert_eq!(
            active(&nav_links(store_id, &format!("/{store_id}/settings"))),
            vec!["Settings"]
        );
    }
}
