//! Sign-in hand-off.
//!
//! The identity provider owns sign-in and sign-up; the dashboard only sends
//! anonymous browsers there.

use axum::{Router, extract::State, response::Redirect, routing::get};

use crate::middleware::auth::SIGN_IN_PATH;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new().route(SIGN_IN_PATH, get(sign_in))
}

/// Redirect to the identity provider.
///
/// GET /sign-in
async fn sign_in(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.config().identity.sign_in_url)
}
