//! Route definitions for the `/users` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET   /               -> list_users
/// POST  /               -> create_user (admin)
/// GET   /{id}           -> get_user
/// PATCH /{id}           -> update_user (admin)
/// PATCH /{id}/unblock   -> unblock_user (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", get(users::get_user).patch(users::update_user))
        .route("/{id}/unblock", patch(users::unblock_user))
}
