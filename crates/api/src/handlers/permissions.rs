//! Handlers for the `/permissions` resource.
//!
//! Admin surface over the catalog; normal deployments only ever read it,
//! since the rows are bootstrap-seeded.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use ledgerd_core::error::CoreError;
use ledgerd_core::permissions::names;
use ledgerd_core::policy::Policy;
use ledgerd_core::roles::ROLE_SYSADMIN;
use ledgerd_core::types::DbId;
use ledgerd_db::models::permission::{CreatePermission, Permission, UpdatePermission};
use ledgerd_db::repositories::PermissionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/v1/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<Permission>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_PERMISSIONS))?;

    let permissions = PermissionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(permissions)))
}

/// POST /api/v1/permissions
pub async fn create_permission(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreatePermission>,
) -> AppResult<(StatusCode, Json<DataResponse<Permission>>)> {
    user.authorize(&Policy::permission(names::CREATE_PERMISSION))?;

    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Permission name is required".into(),
        )));
    }

    if PermissionRepo::find_by_name(&state.pool, &name).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Permission name already exists".into(),
        )));
    }

    let create_dto = CreatePermission {
        name,
        description: input.description,
    };
    let permission = PermissionRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(permission))))
}

/// GET /api/v1/permissions/{id}
pub async fn get_permission(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Permission>>> {
    user.authorize(&Policy::permission(names::VIEW_PERMISSION_BY_ID))?;

    let permission = PermissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Permission", id }))?;
    Ok(Json(DataResponse::new(permission)))
}

/// PATCH /api/v1/permissions/{id}
pub async fn update_permission(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePermission>,
) -> AppResult<Json<DataResponse<Permission>>> {
    user.authorize(&Policy::permission(names::UPDATE_PERMISSION))?;

    if let Some(ref name) = input.name {
        if let Some(existing) = PermissionRepo::find_by_name(&state.pool, name.trim()).await? {
            if existing.id != id {
                return Err(AppError::Core(CoreError::Conflict(
                    "Permission name already exists".into(),
                )));
            }
        }
    }

    let permission = PermissionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Permission", id }))?;
    Ok(Json(DataResponse::new(permission)))
}

/// DELETE /api/v1/permissions/{id}
pub async fn delete_permission(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(&Policy::role_at_least(ROLE_SYSADMIN).and_permission(names::DELETE_PERMISSION))?;

    let deleted = PermissionRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(MessageResponse::new("Permission deleted")))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Permission", id }))
    }
}
