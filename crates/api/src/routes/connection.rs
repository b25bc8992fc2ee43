//! Route definition for the `/connection` probe.

use axum::routing::get;
use axum::Router;

use crate::handlers::connection;
use crate::state::AppState;

/// Routes mounted at `/connection`.
///
/// ```text
/// GET / -> get_connection (service token required)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(connection::get_connection))
}
