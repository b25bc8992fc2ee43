//! Handlers for the `/branches` resource.
//!
//! TIN handling: requests carry the plaintext TIN; handlers compute the
//! lookup digest for the uniqueness pre-check, store ciphertext, and decrypt
//! on the way out. The pre-check-then-write sequence is racy by design.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use ledgerd_core::error::CoreError;
use ledgerd_core::permissions::names;
use ledgerd_core::policy::Policy;
use ledgerd_core::types::DbId;
use ledgerd_db::models::branch::{BranchResponse, CreateBranch, UpdateBranch};
use ledgerd_db::repositories::BranchRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /branches`.
#[derive(Debug, Deserialize)]
pub struct CreateBranchRequest {
    pub name: String,
    pub address: String,
    pub tin: String,
    pub machine_id: Option<String>,
}

/// Request body for `PATCH /branches/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateBranchRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub tin: Option<String>,
    pub machine_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/branches
pub async fn list_branches(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<BranchResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_BRANCHES))?;

    let branches = BranchRepo::list(&state.pool).await?;
    let responses = branches
        .into_iter()
        .map(|b| b.into_response(&state.tin))
        .collect();
    Ok(Json(DataResponse::new(responses)))
}

/// GET /api/v1/branches/deleted
pub async fn list_deleted_branches(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<BranchResponse>>>> {
    user.authorize(&Policy::permission(names::RESTORE_BRANCH))?;

    let branches = BranchRepo::list_deleted(&state.pool).await?;
    let responses = branches
        .into_iter()
        .map(|b| b.into_response(&state.tin))
        .collect();
    Ok(Json(DataResponse::new(responses)))
}

/// POST /api/v1/branches
pub async fn create_branch(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreateBranchRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<BranchResponse>>)> {
    user.authorize(&Policy::permission(names::CREATE_BRANCH))?;

    if input.tin.is_empty() {
        return Err(AppError::Core(CoreError::Validation("TIN is required".into())));
    }

    let digest = state.tin.digest(&input.tin);
    if BranchRepo::find_by_tin_digest(&state.pool, &digest, None)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict("Branch TIN already exists".into())));
    }

    let create_dto = CreateBranch {
        name: input.name,
        address: input.address,
        tin: state.tin.encrypt(&input.tin),
        tin_digest: digest,
        machine_id: input.machine_id,
    };

    let branch = BranchRepo::create(&state.pool, &create_dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(branch.into_response(&state.tin))),
    ))
}

/// GET /api/v1/branches/{id}
pub async fn get_branch(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BranchResponse>>> {
    user.authorize(&Policy::permission(names::VIEW_BRANCH_BY_ID))?;

    let branch = BranchRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Branch", id }))?;
    Ok(Json(DataResponse::new(branch.into_response(&state.tin))))
}

/// PATCH /api/v1/branches/{id}
pub async fn update_branch(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBranchRequest>,
) -> AppResult<Json<DataResponse<BranchResponse>>> {
    user.authorize(&Policy::permission(names::UPDATE_BRANCH))?;

    let (tin, tin_digest) = match input.tin {
        Some(ref plaintext) if !plaintext.is_empty() => {
            let digest = state.tin.digest(plaintext);
            if BranchRepo::find_by_tin_digest(&state.pool, &digest, Some(id))
                .await?
                .is_some()
            {
                return Err(AppError::Core(CoreError::Conflict(
                    "Branch TIN already exists".into(),
                )));
            }
            (Some(state.tin.encrypt(plaintext)), Some(digest))
        }
        _ => (None, None),
    };

    let update_dto = UpdateBranch {
        name: input.name,
        address: input.address,
        tin,
        tin_digest,
        machine_id: input.machine_id,
    };

    let branch = BranchRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Branch", id }))?;
    Ok(Json(DataResponse::new(branch.into_response(&state.tin))))
}

/// DELETE /api/v1/branches/{id}
///
/// Soft delete. Deleting an already-deleted branch matches no row and
/// reports not found.
pub async fn delete_branch(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(&Policy::permission(names::DELETE_BRANCH))?;

    let deleted = BranchRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(MessageResponse::new("Branch deleted")))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Branch", id }))
    }
}

/// PATCH /api/v1/branches/{id}/restore
pub async fn restore_branch(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BranchResponse>>> {
    user.authorize(&Policy::permission(names::RESTORE_BRANCH))?;

    let restored = BranchRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound { entity: "Branch", id }));
    }

    let branch = BranchRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Branch", id }))?;
    Ok(Json(DataResponse::new(branch.into_response(&state.tin))))
}
