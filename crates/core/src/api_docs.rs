//! The five documented REST endpoints of an entity, shown under every list
//! page so store owners can wire a storefront against them.

use core::fmt;

use serde::Serialize;

use crate::entity::EntityKind;

/// Who may call a documented endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiAccess {
    /// Readable without signing in.
    Public,
    /// Requires the store owner.
    Admin,
}

impl ApiAccess {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for ApiAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One documented endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRoute {
    /// HTTP method shown as the entry title.
    pub title: &'static str,
    pub access: ApiAccess,
    /// Fully qualified URL, with `{idParam}` left as a placeholder.
    pub url: String,
}

/// Build the five endpoint entries for an entity.
///
/// `origin` is the scheme and host the dashboard is served from, without a
/// trailing slash.
#[must_use]
pub fn api_routes(
    origin: &str,
    store_id: impl fmt::Display,
    entity_name: &str,
    entity_id_name: &str,
) -> [ApiRoute; 5] {
    let base = format!("{}/api/{store_id}", origin.trim_end_matches('/'));
    let collection = format!("{base}/{entity_name}");
    let item = format!("{base}/{entity_name}/{{{entity_id_name}}}");

    [
        ApiRoute {
            title: "GET",
            access: ApiAccess::Public,
            url: collection.clone(),
        },
        ApiRoute {
            title: "GET",
            access: ApiAccess::Public,
            url: item.clone(),
        },
        ApiRoute {
            title: "POST",
            access: ApiAccess::Admin,
            url: collection,
        },
        ApiRoute {
            title: "PATCH",
            access: ApiAccess::Admin,
            url: item.clone(),
        },
        ApiRoute {
            title: "DELETE",
            access: ApiAccess::Admin,
            url: item,
        },
    ]
}

/// [`api_routes`] for a known entity kind.
#[must_use]
pub fn api_routes_for(origin: &str, store_id: impl fmt::Display, kind: EntityKind) -> [ApiRoute; 5] {
    api_routes(origin, store_id, kind.collection(), kind.id_param())
}

/// The single base-URL entry shown on the settings page.
#[must_use]
pub fn public_api_url(origin: &str, store_id: impl fmt::Display) -> ApiRoute {
    ApiRoute {
        title: "PUBLIC_API_URL",
        access: ApiAccess::Public,
        url: format!("{}/api/{store_id}", origin.trim_end_matches('/')),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_routes() {
        let routes = api_routes("https://admin.test", "s1", "billboards", "billboardId");
        let rendered: Vec<(&str, ApiAccess, &str)> = routes
            .iter()
            .map(|r| (r.title, r.access, r.url.as_str()))
            .collect();

        assert_eq!(
            rendered,
            vec![
                ("GET", ApiAccess::Public, "https://admin.test/api/s1/billboards"),
                (
                    "GET",
                    ApiAccess::Public,
                    "https://admin.test/api/s1/billboards/{billboardId}"
                ),
                ("POST", ApiAccess::Admin, "https://admin.test/api/s1/billboards"),
                (
                    "PATCH",
                    ApiAccess::Admin,
                    "https://admin.test/api/s1/billboards/{billboardId}"
                ),
                (
                    "DELETE",
                    ApiAccess::Admin,
                    "https://admin.test/api/s1/billboards/{billboardId}"
                ),
            ]
        );
    }

    #[test]
    fn test_trailing_slash_on_origin_is_ignored() {
        let routes = api_routes_for("http://localhost:3001/", "s1", EntityKind::Size);
        assert_eq!(routes[0].url, "http://localhost:3001/api/s1/sizes");
        assert_eq!(routes[4].url, "http://localhost:3001/api/s1/sizes/{sizeId}");
    }

    #[test]
    fn test_public_api_url() {
        let route = public_api_url("http://localhost:3001", "s1");
        assert_eq!(route.url, "http://localhost:3001/api/s1");
        assert_eq!(route.access.label(), "Public");
    }
}
