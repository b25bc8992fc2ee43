//! Handlers for the `/auth` resource (sign-in).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use ledgerd_core::error::CoreError;
use ledgerd_db::models::user::{UserResponse, STATUS_BLOCKED};
use ledgerd_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::ServiceToken;
use crate::state::AppState;

/// Maximum consecutive failed sign-in attempts before blocking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Successful sign-in response.
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
    pub access_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signin
///
/// Authenticate with email + password. The route itself sits behind the
/// service-token gate, so anonymous internet traffic never reaches the
/// credential check. Five consecutive failed password checks block the
/// account; a blocked account is rejected even with the correct password.
pub async fn sign_in(
    State(state): State<AppState>,
    _service: ServiceToken,
    Json(input): Json<SignInRequest>,
) -> AppResult<Json<SignInResponse>> {
    if input.email.is_empty() || input.password.is_empty() {
        let mut missing = Vec::new();
        if input.email.is_empty() {
            missing.push("email is required");
        }
        if input.password.is_empty() {
            missing.push("password is required");
        }
        return Err(AppError::Core(CoreError::Validation(missing.join("; "))));
    }

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    // A blocked account stays blocked no matter what the password is.
    if user.status == STATUS_BLOCKED {
        return Err(AppError::Core(CoreError::Forbidden("Account is blocked".into())));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        UserRepo::increment_failed_attempts(&state.pool, user.id).await?;

        let new_count = user.failed_login_attempts + 1;
        if new_count >= MAX_FAILED_ATTEMPTS {
            UserRepo::block(&state.pool, user.id).await?;
            tracing::warn!(user_id = user.id, "Account blocked after repeated failed sign-ins");
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    // Success: the account becomes active and the failure counter resets.
    UserRepo::record_successful_sign_in(&state.pool, user.id).await?;

    let access_token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    // Re-read so the response reflects the post-sign-in status.
    let user = UserRepo::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::InternalError("User vanished during sign-in".into()))?;

    Ok(Json(SignInResponse {
        success: true,
        message: "Sign in successful".into(),
        user: user.into(),
        access_token,
    }))
}
