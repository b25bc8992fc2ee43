//! Route definitions for the `/agents` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::agents;
use crate::state::AppState;

/// Routes mounted at `/agents`.
///
/// ```text
/// GET    /               -> list_agents
/// GET    /deleted        -> list_deleted_agents
/// POST   /               -> create_agent
/// GET    /{id}           -> get_agent
/// PATCH  /{id}           -> update_agent
/// DELETE /{id}           -> delete_agent
/// PATCH  /{id}/restore   -> restore_agent
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(agents::list_agents).post(agents::create_agent))
        .route("/deleted", get(agents::list_deleted_agents))
        .route(
            "/{id}",
            get(agents::get_agent)
                .patch(agents::update_agent)
                .delete(agents::delete_agent),
        )
        .route("/{id}/restore", patch(agents::restore_agent))
}
