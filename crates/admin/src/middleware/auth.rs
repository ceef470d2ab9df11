//! Authentication extractor.
//!
//! Sign-in is handled by the identity provider, which runs as an
//! authenticating proxy in front of the dashboard and forwards the signed-in
//! user's id in a header (`IDENTITY_USER_HEADER`). A request without that
//! header is anonymous.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};

use storeboard_core::UserId;

use crate::error::set_sentry_user;
use crate::state::AppState;

/// Where anonymous page requests are sent.
pub const SIGN_IN_PATH: &str = "/sign-in";

/// Extractor that requires a signed-in user.
///
/// If no user id was forwarded, returns a redirect to `/sign-in` for page
/// requests, or 401 Unauthorized for API requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireUser(user_id): RequireUser) -> impl IntoResponse {
///     format!("Hello, {user_id}!")
/// }
/// ```
pub struct RequireUser(pub UserId);

/// Error returned when a user is required but the request is anonymous.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to the sign-in page (for HTML requests).
    RedirectToSignIn,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToSignIn => Redirect::to(SIGN_IN_PATH).into_response(),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthenticated").into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = &state.config().identity.user_header;
        let user_id = parts
            .headers
            .get(header)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| UserId::parse(value).ok());

        let Some(user_id) = user_id else {
            let is_api = parts.uri.path().starts_with("/api/");
            return Err(if is_api {
                AuthRejection::Unauthorized
            } else {
                AuthRejection::RedirectToSignIn
            });
        };

        set_sentry_user(user_id.as_str());
        Ok(Self(user_id))
    }
}
