//! Handlers for the `/roles` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use ledgerd_core::error::CoreError;
use ledgerd_core::permissions::names;
use ledgerd_core::policy::Policy;
use ledgerd_core::roles::ROLE_SYSADMIN;
use ledgerd_core::types::DbId;
use ledgerd_db::models::role::{CreateRole, RoleWithPermissions, UpdateRole};
use ledgerd_db::repositories::{PermissionRepo, RoleRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/v1/roles
pub async fn list_roles(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<RoleWithPermissions>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_ROLES))?;

    let roles = RoleRepo::list(&state.pool).await?;
    let mut populated = Vec::with_capacity(roles.len());
    for role in roles {
        let permissions = RoleRepo::permissions_for(&state.pool, role.id).await?;
        populated.push(RoleWithPermissions { role, permissions });
    }
    Ok(Json(DataResponse::new(populated)))
}

/// POST /api/v1/roles
///
/// Create a role. The permission-id list is validated as a whole: any id
/// that does not reference an existing permission rejects the request.
pub async fn create_role(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreateRole>,
) -> AppResult<(StatusCode, Json<DataResponse<RoleWithPermissions>>)> {
    user.authorize(&Policy::permission(names::CREATE_ROLE))?;

    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation("Role name is required".into())));
    }

    if RoleRepo::find_by_name(&state.pool, &name).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict("Role name already exists".into())));
    }

    validate_permission_ids(&state, &input.permission_ids).await?;

    let role = RoleRepo::create(&state.pool, &name, &input.permission_ids).await?;
    let permissions = RoleRepo::permissions_for(&state.pool, role.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(RoleWithPermissions { role, permissions })),
    ))
}

/// GET /api/v1/roles/{id}
pub async fn get_role(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RoleWithPermissions>>> {
    user.authorize(&Policy::permission(names::VIEW_ROLE_BY_ID))?;

    let role = RoleRepo::find_with_permissions(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;
    Ok(Json(DataResponse::new(role)))
}

/// PATCH /api/v1/roles/{id}
///
/// Rename a role and/or replace its grant set. Renaming does NOT cascade to
/// users, which store the role by name.
pub async fn update_role(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRole>,
) -> AppResult<Json<DataResponse<RoleWithPermissions>>> {
    user.authorize(&Policy::permission(names::UPDATE_ROLE))?;

    let name = input.name.as_ref().map(|n| n.trim().to_string());
    if let Some(ref n) = name {
        if n.is_empty() {
            return Err(AppError::Core(CoreError::Validation("Role name is required".into())));
        }
        if let Some(existing) = RoleRepo::find_by_name(&state.pool, n).await? {
            if existing.id != id {
                return Err(AppError::Core(CoreError::Conflict(
                    "Role name already exists".into(),
                )));
            }
        }
    }

    if let Some(ref ids) = input.permission_ids {
        validate_permission_ids(&state, ids).await?;
    }

    let role = RoleRepo::update(&state.pool, id, name.as_deref(), input.permission_ids.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;
    let permissions = RoleRepo::permissions_for(&state.pool, role.id).await?;
    Ok(Json(DataResponse::new(RoleWithPermissions { role, permissions })))
}

/// DELETE /api/v1/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(&Policy::role_at_least(ROLE_SYSADMIN).and_permission(names::DELETE_ROLE))?;

    let deleted = RoleRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(MessageResponse::new("Role deleted")))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Role", id }))
    }
}

/// Reject the request unless every id references an existing permission.
async fn validate_permission_ids(state: &AppState, ids: &[DbId]) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found = PermissionRepo::count_existing(&state.pool, ids).await?;
    if found != ids.len() as i64 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Some permission(s) are invalid: provided {}, found {found}",
            ids.len()
        ))));
    }
    Ok(())
}
