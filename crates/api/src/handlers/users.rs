//! Handlers for the `/users` resource (credential management).
//!
//! Mutating routes stack a coarse admin role gate on top of the fine-grained
//! capability check; read routes are capability-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use ledgerd_core::error::CoreError;
use ledgerd_core::permissions::names;
use ledgerd_core::policy::Policy;
use ledgerd_core::roles::ROLE_ADMIN;
use ledgerd_core::types::DbId;
use ledgerd_db::models::user::{CreateUser, UpdateUser, UserResponse, STATUS_BLOCKED};
use ledgerd_db::repositories::{RoleRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: Option<String>,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Request body for `PATCH /users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_initial: Option<String>,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: Option<String>,
    pub role: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_USERS))?;

    let users = UserRepo::list(&state.pool).await?;
    let responses = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse::new(responses)))
}

/// POST /api/v1/users
///
/// Create a new user. Validates email format, password strength, and that
/// the named role is registered; the account starts `inactive`.
pub async fn create_user(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    user.authorize(&Policy::role_at_least(ROLE_ADMIN).and_permission(names::CREATE_USER))?;

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if RoleRepo::find_by_name(&state.pool, &input.role).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role: {}",
            input.role
        ))));
    }

    // Racy pre-check by design; the uq_users_email constraint backstops it.
    if UserRepo::find_by_email(&state.pool, &input.email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict("Email already exists".into())));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        first_name: input.first_name,
        last_name: input.last_name,
        middle_initial: input.middle_initial,
        email: input.email,
        password_hash: hashed,
        role: input.role,
    };

    let created = UserRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(created.into()))))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    user.authorize(&Policy::permission(names::VIEW_USER_BY_ID))?;

    let found = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse::new(found.into())))
}

/// PATCH /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    user.authorize(&Policy::role_at_least(ROLE_ADMIN).and_permission(names::UPDATE_USER))?;

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    if let Some(ref role) = input.role {
        if RoleRepo::find_by_name(&state.pool, role).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown role: {role}"
            ))));
        }
    }

    let update_dto = UpdateUser {
        first_name: input.first_name,
        last_name: input.last_name,
        middle_initial: input.middle_initial,
        email: input.email,
        role: input.role,
    };

    let updated = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse::new(updated.into())))
}

/// PATCH /api/v1/users/{id}/unblock
///
/// Lift a block: the account returns to `inactive` (the next sign-in
/// re-activates it) and `restored_at` is stamped.
pub async fn unblock_user(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    user.authorize(&Policy::role_at_least(ROLE_ADMIN).and_permission(names::UNBLOCK_USER))?;

    let unblocked = UserRepo::unblock(&state.pool, id).await?;
    if !unblocked {
        // Distinguish "no such user" from "user exists but is not blocked".
        return match UserRepo::find_by_id(&state.pool, id).await? {
            None => Err(AppError::Core(CoreError::NotFound { entity: "User", id })),
            Some(u) if u.status != STATUS_BLOCKED => Err(AppError::Core(CoreError::Validation(
                "User is not blocked".into(),
            ))),
            Some(_) => Err(AppError::InternalError("Unblock did not apply".into())),
        };
    }

    let refreshed = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse::new(refreshed.into())))
}
