//! Route definitions for the `/branches` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::branches;
use crate::state::AppState;

/// Routes mounted at `/branches`.
///
/// ```text
/// GET    /               -> list_branches
/// GET    /deleted        -> list_deleted_branches
/// POST   /               -> create_branch
/// GET    /{id}           -> get_branch
/// PATCH  /{id}           -> update_branch
/// DELETE /{id}           -> delete_branch
/// PATCH  /{id}/restore   -> restore_branch
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(branches::list_branches).post(branches::create_branch))
        .route("/deleted", get(branches::list_deleted_branches))
        .route(
            "/{id}",
            get(branches::get_branch)
                .patch(branches::update_branch)
                .delete(branches::delete_branch),
        )
        .route("/{id}/restore", patch(branches::restore_branch))
}
