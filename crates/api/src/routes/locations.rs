//! Route definitions for the `/locations` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::locations;
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// GET    /               -> list_locations
/// GET    /deleted        -> list_deleted_locations
/// POST   /               -> create_location
/// GET    /{id}           -> get_location
/// PATCH  /{id}           -> update_location
/// DELETE /{id}           -> delete_location
/// PATCH  /{id}/restore   -> restore_location
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(locations::list_locations).post(locations::create_location),
        )
        .route("/deleted", get(locations::list_deleted_locations))
        .route(
            "/{id}",
            get(locations::get_location)
                .patch(locations::update_location)
                .delete(locations::delete_location),
        )
        .route("/{id}/restore", patch(locations::restore_location))
}
