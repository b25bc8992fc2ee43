//! Handler for the `/connection` probe.

use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::ServiceToken;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/v1/connection
///
/// Service-token-gated liveness probe: confirms the API and its database are
/// reachable without exposing anything to anonymous traffic.
pub async fn get_connection(
    State(state): State<AppState>,
    _service: ServiceToken,
) -> AppResult<Json<MessageResponse>> {
    ledgerd_db::health_check(&state.pool).await?;
    Ok(Json(MessageResponse::new("Connected to ledgerd server")))
}
