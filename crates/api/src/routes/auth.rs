//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signin -> sign_in (service token required)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/signin", post(auth::sign_in))
}
