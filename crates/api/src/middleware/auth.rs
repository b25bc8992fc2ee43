//! Authentication extractors and per-route policy enforcement.
//!
//! [`Principal`] is the user-token gate: it verifies the bearer JWT, loads
//! the live user (rejecting blocked accounts even while their token is still
//! unexpired), and resolves the role's permission-name set for the policy
//! engine. [`ServiceToken`] is the independent shared-secret gate protecting
//! the sign-in and connection endpoints.

use std::collections::HashSet;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use ledgerd_core::error::CoreError;
use ledgerd_core::policy::Policy;
use ledgerd_core::types::DbId;
use ledgerd_db::models::user::STATUS_BLOCKED;
use ledgerd_db::repositories::{RoleRepo, UserRepo};

use crate::auth::jwt::{validate_service_token, validate_token};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated principal extracted from a JWT Bearer token in the
/// `Authorization` header, with the role's permission-name set resolved.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication, then declare the route's policy at the top:
///
/// ```ignore
/// async fn delete_agent(State(state): State<AppState>, user: Principal) -> AppResult<...> {
///     user.authorize(&Policy::permission(names::DELETE_AGENT))?;
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Principal {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub email: String,
    /// The user's role name (e.g. `"sysadmin"`, `"regular"`).
    pub role: String,
    /// Permission names granted through the role. Empty when the stored
    /// role name no longer resolves to a registered role.
    pub permissions: HashSet<String>,
}

impl Principal {
    /// Evaluate a route policy against this principal. Denials surface as
    /// 403 Forbidden naming the failing requirement.
    pub fn authorize(&self, policy: &Policy) -> Result<(), AppError> {
        policy
            .evaluate(&self.role, &self.permissions)
            .map_err(|denial| AppError::Core(CoreError::Forbidden(denial.to_string())))
    }
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // Resolve the live user; a still-valid token must not grant access
        // to a deleted or blocked account.
        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthorized".into())))?;

        if user.status == STATUS_BLOCKED {
            return Err(AppError::Core(CoreError::Unauthorized("Unauthorized".into())));
        }

        let permissions = RoleRepo::permission_names_for_role(&state.pool, &user.role)
            .await?
            .unwrap_or_default()
            .into_iter()
            .collect();

        Ok(Principal {
            user_id: user.id,
            email: user.email,
            role: user.role,
            permissions,
        })
    }
}

/// Shared-secret service-token gate. Carries no identity; its presence in a
/// handler signature is the route's whole requirement.
#[derive(Debug, Clone, Copy)]
pub struct ServiceToken;

impl FromRequestParts<AppState> for ServiceToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        if !validate_service_token(token, &state.config.service) {
            return Err(AppError::Core(CoreError::Unauthorized("Unauthorized".into())));
        }
        Ok(ServiceToken)
    }
}

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing Authorization header".into()))
        })?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })
}
