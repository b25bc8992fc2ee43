//! Handlers for the `/general-journals` journal.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use ledgerd_core::audit::{AuditAction, JournalKind};
use ledgerd_core::error::CoreError;
use ledgerd_core::permissions::names;
use ledgerd_core::policy::Policy;
use ledgerd_core::types::DbId;
use ledgerd_db::models::journals::{CreateGeneralJournal, GeneralJournal, UpdateGeneralJournal};
use ledgerd_db::models::location::LocationResponse;
use ledgerd_db::models::transaction_log::CreateTransactionLog;
use ledgerd_db::repositories::{GeneralJournalRepo, TransactionLogRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::locations;
use crate::middleware::auth::Principal;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

const KIND: JournalKind = JournalKind::GeneralJournal;

/// A general journal entry with its location populated. A soft-deleted
/// location serializes as `null`.
#[derive(Debug, Serialize)]
pub struct GeneralJournalResponse {
    #[serde(flatten)]
    pub transaction: GeneralJournal,
    pub location: Option<LocationResponse>,
}

async fn to_response(state: &AppState, transaction: GeneralJournal) -> AppResult<GeneralJournalResponse> {
    let location = locations::populate_location(state, transaction.location_id).await?;
    Ok(GeneralJournalResponse {
        transaction,
        location,
    })
}

async fn record(state: &AppState, user: &Principal, id: DbId, action: AuditAction) -> AppResult<()> {
    let log = CreateTransactionLog {
        journal_kind: KIND,
        journal_id: id,
        action,
        remarks: String::new(),
        remarks_by: user.user_id,
    };
    TransactionLogRepo::create(&state.pool, &log).await?;
    Ok(())
}

/// GET /api/v1/general-journals
pub async fn list(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<GeneralJournalResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_TRANSACTIONS))?;

    let rows = GeneralJournalRepo::list(&state.pool).await?;
    let mut responses = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(to_response(&state, row).await?);
    }
    Ok(Json(DataResponse::new(responses)))
}

/// GET /api/v1/general-journals/deleted
pub async fn list_deleted(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<GeneralJournalResponse>>>> {
    user.authorize(&Policy::permission(names::RESTORE_TRANSACTION))?;

    let rows = GeneralJournalRepo::list_deleted(&state.pool).await?;
    let mut responses = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(to_response(&state, row).await?);
    }
    Ok(Json(DataResponse::new(responses)))
}

/// POST /api/v1/general-journals
pub async fn create(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreateGeneralJournal>,
) -> AppResult<(StatusCode, Json<DataResponse<GeneralJournalResponse>>)> {
    user.authorize(&Policy::permission(names::CREATE_TRANSACTION))?;

    let row = GeneralJournalRepo::create(&state.pool, &input).await?;
    record(&state, &user, row.id, AuditAction::Create).await?;

    let response = to_response(&state, row).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(response))))
}

/// GET /api/v1/general-journals/{id}
pub async fn get(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneralJournalResponse>>> {
    user.authorize(&Policy::permission(names::VIEW_TRANSACTION_BY_ID))?;

    let row = GeneralJournalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "GeneralJournal", id }))?;
    let response = to_response(&state, row).await?;
    Ok(Json(DataResponse::new(response)))
}

/// PATCH /api/v1/general-journals/{id}
pub async fn update(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGeneralJournal>,
) -> AppResult<Json<DataResponse<GeneralJournalResponse>>> {
    user.authorize(&Policy::permission(names::UPDATE_TRANSACTION))?;

    let row = GeneralJournalRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "GeneralJournal", id }))?;
    record(&state, &user, id, AuditAction::Update).await?;

    let response = to_response(&state, row).await?;
    Ok(Json(DataResponse::new(response)))
}

/// DELETE /api/v1/general-journals/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(&Policy::permission(names::DELETE_TRANSACTION))?;

    let deleted = GeneralJournalRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "GeneralJournal", id }));
    }
    record(&state, &user, id, AuditAction::Delete).await?;
    Ok(Json(MessageResponse::new("General journal entry deleted")))
}

/// PATCH /api/v1/general-journals/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneralJournalResponse>>> {
    user.authorize(&Policy::permission(names::RESTORE_TRANSACTION))?;

    let restored = GeneralJournalRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound { entity: "GeneralJournal", id }));
    }
    record(&state, &user, id, AuditAction::Restore).await?;

    let row = GeneralJournalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "GeneralJournal", id }))?;
    let response = to_response(&state, row).await?;
    Ok(Json(DataResponse::new(response)))
}
