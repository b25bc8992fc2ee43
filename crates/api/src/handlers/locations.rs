//! Handlers for the `/locations` resource.
//!
//! Locations reference a parent branch. Deleting a branch does not cascade;
//! instead every read that populates the branch goes through the
//! soft-delete-filtered lookup, so a deleted branch serializes as `null`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use ledgerd_core::error::CoreError;
use ledgerd_core::permissions::names;
use ledgerd_core::policy::Policy;
use ledgerd_core::types::DbId;
use ledgerd_db::models::location::{CreateLocation, Location, LocationResponse, UpdateLocation};
use ledgerd_db::repositories::{BranchRepo, LocationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /locations`.
#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
    pub address: String,
    pub tin: String,
    pub machine_id: Option<String>,
    pub branch_id: Option<DbId>,
}

/// Request body for `PATCH /locations/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub tin: Option<String>,
    pub machine_id: Option<String>,
    pub branch_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Population helpers
// ---------------------------------------------------------------------------

/// Build a [`LocationResponse`] with the parent branch populated through the
/// soft-delete filter (deleted branch -> `null`).
pub(crate) async fn to_response(
    state: &AppState,
    location: Location,
) -> AppResult<LocationResponse> {
    let branch = match location.branch_id {
        Some(branch_id) => BranchRepo::find_by_id(&state.pool, branch_id)
            .await?
            .map(|b| b.into_response(&state.tin)),
        None => None,
    };
    Ok(location.into_response(&state.tin, branch))
}

/// Populate a journal's location reference: the soft-delete-filtered lookup
/// nulls out deleted locations, and the nested branch follows the same rule.
pub(crate) async fn populate_location(
    state: &AppState,
    location_id: Option<DbId>,
) -> AppResult<Option<LocationResponse>> {
    let Some(id) = location_id else {
        return Ok(None);
    };
    match LocationRepo::find_by_id(&state.pool, id).await? {
        Some(location) => Ok(Some(to_response(state, location).await?)),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/locations
pub async fn list_locations(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<LocationResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_LOCATIONS))?;

    let locations = LocationRepo::list(&state.pool).await?;
    let mut responses = Vec::with_capacity(locations.len());
    for location in locations {
        responses.push(to_response(&state, location).await?);
    }
    Ok(Json(DataResponse::new(responses)))
}

/// GET /api/v1/locations/deleted
pub async fn list_deleted_locations(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<LocationResponse>>>> {
    user.authorize(&Policy::permission(names::RESTORE_LOCATION))?;

    let locations = LocationRepo::list_deleted(&state.pool).await?;
    let mut responses = Vec::with_capacity(locations.len());
    for location in locations {
        responses.push(to_response(&state, location).await?);
    }
    Ok(Json(DataResponse::new(responses)))
}

/// POST /api/v1/locations
pub async fn create_location(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreateLocationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LocationResponse>>)> {
    user.authorize(&Policy::permission(names::CREATE_LOCATION))?;

    if input.tin.is_empty() {
        return Err(AppError::Core(CoreError::Validation("TIN is required".into())));
    }

    let digest = state.tin.digest(&input.tin);
    if LocationRepo::find_by_tin_digest(&state.pool, &digest, None)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Location TIN already exists".into(),
        )));
    }

    // A dangling branch id is a validation error, not an FK surprise later.
    if let Some(branch_id) = input.branch_id {
        if BranchRepo::find_by_id(&state.pool, branch_id).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown branch: {branch_id}"
            ))));
        }
    }

    let create_dto = CreateLocation {
        name: input.name,
        address: input.address,
        tin: state.tin.encrypt(&input.tin),
        tin_digest: digest,
        machine_id: input.machine_id,
        branch_id: input.branch_id,
    };

    let location = LocationRepo::create(&state.pool, &create_dto).await?;
    let response = to_response(&state, location).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(response))))
}

/// GET /api/v1/locations/{id}
pub async fn get_location(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LocationResponse>>> {
    user.authorize(&Policy::permission(names::VIEW_LOCATION_BY_ID))?;

    let location = LocationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Location", id }))?;
    let response = to_response(&state, location).await?;
    Ok(Json(DataResponse::new(response)))
}

/// PATCH /api/v1/locations/{id}
pub async fn update_location(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLocationRequest>,
) -> AppResult<Json<DataResponse<LocationResponse>>> {
    user.authorize(&Policy::permission(names::UPDATE_LOCATION))?;

    let (tin, tin_digest) = match input.tin {
        Some(ref plaintext) if !plaintext.is_empty() => {
            let digest = state.tin.digest(plaintext);
            if LocationRepo::find_by_tin_digest(&state.pool, &digest, Some(id))
                .await?
                .is_some()
            {
                return Err(AppError::Core(CoreError::Conflict(
                    "Location TIN already exists".into(),
                )));
            }
            (Some(state.tin.encrypt(plaintext)), Some(digest))
        }
        _ => (None, None),
    };

    if let Some(branch_id) = input.branch_id {
        if BranchRepo::find_by_id(&state.pool, branch_id).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown branch: {branch_id}"
            ))));
        }
    }

    let update_dto = UpdateLocation {
        name: input.name,
        address: input.address,
        tin,
        tin_digest,
        machine_id: input.machine_id,
        branch_id: input.branch_id,
    };

    let location = LocationRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Location", id }))?;
    let response = to_response(&state, location).await?;
    Ok(Json(DataResponse::new(response)))
}

/// DELETE /api/v1/locations/{id}
pub async fn delete_location(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(&Policy::permission(names::DELETE_LOCATION))?;

    let deleted = LocationRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(MessageResponse::new("Location deleted")))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Location", id }))
    }
}

/// PATCH /api/v1/locations/{id}/restore
pub async fn restore_location(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LocationResponse>>> {
    user.authorize(&Policy::permission(names::RESTORE_LOCATION))?;

    let restored = LocationRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound { entity: "Location", id }));
    }

    let location = LocationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Location", id }))?;
    let response = to_response(&state, location).await?;
    Ok(Json(DataResponse::new(response)))
}
