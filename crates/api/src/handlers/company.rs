//! Handlers for the `/company-info` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use ledgerd_core::error::CoreError;
use ledgerd_core::permissions::names;
use ledgerd_core::policy::Policy;
use ledgerd_core::types::DbId;
use ledgerd_db::models::company::{CompanyInfoResponse, CreateCompanyInfo, UpdateCompanyInfo};
use ledgerd_db::repositories::CompanyInfoRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /company-info`.
#[derive(Debug, Deserialize)]
pub struct CreateCompanyInfoRequest {
    pub name: String,
    pub address: String,
    pub tin: String,
    pub machine_id: Option<String>,
    #[serde(default = "default_registration_type")]
    pub registration_type: String,
}

fn default_registration_type() -> String {
    "corporation".to_string()
}

/// Request body for `PATCH /company-info/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateCompanyInfoRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub tin: Option<String>,
    pub machine_id: Option<String>,
    pub registration_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/company-info
pub async fn list_company_info(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<CompanyInfoResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_COMPANY_INFO))?;

    let records = CompanyInfoRepo::list(&state.pool).await?;
    let responses = records
        .into_iter()
        .map(|c| c.into_response(&state.tin))
        .collect();
    Ok(Json(DataResponse::new(responses)))
}

/// GET /api/v1/company-info/deleted
pub async fn list_deleted_company_info(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<CompanyInfoResponse>>>> {
    user.authorize(&Policy::permission(names::RESTORE_COMPANY_INFO))?;

    let records = CompanyInfoRepo::list_deleted(&state.pool).await?;
    let responses = records
        .into_iter()
        .map(|c| c.into_response(&state.tin))
        .collect();
    Ok(Json(DataResponse::new(responses)))
}

/// POST /api/v1/company-info
pub async fn create_company_info(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreateCompanyInfoRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CompanyInfoResponse>>)> {
    user.authorize(&Policy::permission(names::CREATE_COMPANY_INFO))?;

    if input.tin.is_empty() {
        return Err(AppError::Core(CoreError::Validation("TIN is required".into())));
    }

    let digest = state.tin.digest(&input.tin);
    if CompanyInfoRepo::find_by_tin_digest(&state.pool, &digest, None)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Company TIN already exists".into(),
        )));
    }

    let create_dto = CreateCompanyInfo {
        name: input.name,
        address: input.address,
        tin: state.tin.encrypt(&input.tin),
        tin_digest: digest,
        machine_id: input.machine_id,
        registration_type: input.registration_type,
    };

    let record = CompanyInfoRepo::create(&state.pool, &create_dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(record.into_response(&state.tin))),
    ))
}

/// GET /api/v1/company-info/{id}
pub async fn get_company_info(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CompanyInfoResponse>>> {
    user.authorize(&Policy::permission(names::VIEW_COMPANY_INFO_BY_ID))?;

    let record = CompanyInfoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "CompanyInfo", id }))?;
    Ok(Json(DataResponse::new(record.into_response(&state.tin))))
}

/// PATCH /api/v1/company-info/{id}
pub async fn update_company_info(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCompanyInfoRequest>,
) -> AppResult<Json<DataResponse<CompanyInfoResponse>>> {
    user.authorize(&Policy::permission(names::UPDATE_COMPANY_INFO))?;

    let (tin, tin_digest) = match input.tin {
        Some(ref plaintext) if !plaintext.is_empty() => {
            let digest = state.tin.digest(plaintext);
            if CompanyInfoRepo::find_by_tin_digest(&state.pool, &digest, Some(id))
                .await?
                .is_some()
            {
                return Err(AppError::Core(CoreError::Conflict(
                    "Company TIN already exists".into(),
                )));
            }
            (Some(state.tin.encrypt(plaintext)), Some(digest))
        }
        _ => (None, None),
    };

    let update_dto = UpdateCompanyInfo {
        name: input.name,
        address: input.address,
        tin,
        tin_digest,
        machine_id: input.machine_id,
        registration_type: input.registration_type,
    };

    let record = CompanyInfoRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "CompanyInfo", id }))?;
    Ok(Json(DataResponse::new(record.into_response(&state.tin))))
}

/// DELETE /api/v1/company-info/{id}
pub async fn delete_company_info(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(&Policy::permission(names::DELETE_COMPANY_INFO))?;

    let deleted = CompanyInfoRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(MessageResponse::new("Company info deleted")))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "CompanyInfo", id }))
    }
}

/// PATCH /api/v1/company-info/{id}/restore
pub async fn restore_company_info(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CompanyInfoResponse>>> {
    user.authorize(&Policy::permission(names::RESTORE_COMPANY_INFO))?;

    let restored = CompanyInfoRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound { entity: "CompanyInfo", id }));
    }

    let record = CompanyInfoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "CompanyInfo", id }))?;
    Ok(Json(DataResponse::new(record.into_response(&state.tin))))
}
