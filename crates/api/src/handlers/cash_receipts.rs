//! Handlers for the `/cash-receipts` journal.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use ledgerd_core::audit::{AuditAction, JournalKind};
use ledgerd_core::error::CoreError;
use ledgerd_core::permissions::names;
use ledgerd_core::policy::Policy;
use ledgerd_core::types::DbId;
use ledgerd_db::models::account::ChartOfAccount;
use ledgerd_db::models::agent::AgentResponse;
use ledgerd_db::models::journals::{CashReceipt, CreateCashReceipt, UpdateCashReceipt};
use ledgerd_db::models::location::LocationResponse;
use ledgerd_db::models::transaction_log::CreateTransactionLog;
use ledgerd_db::repositories::{CashReceiptRepo, TransactionLogRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{accounts, agents, locations};
use crate::middleware::auth::Principal;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

const KIND: JournalKind = JournalKind::CashReceipts;

/// A cash receipt with its references populated. Soft-deleted references
/// serialize as `null`.
#[derive(Debug, Serialize)]
pub struct CashReceiptResponse {
    #[serde(flatten)]
    pub transaction: CashReceipt,
    pub location: Option<LocationResponse>,
    pub payor: Option<AgentResponse>,
    pub cash_account: Option<ChartOfAccount>,
}

async fn to_response(state: &AppState, transaction: CashReceipt) -> AppResult<CashReceiptResponse> {
    let location = locations::populate_location(state, transaction.location_id).await?;
    let payor = agents::populate_agent(state, transaction.payor_agent_id).await?;
    let cash_account = accounts::populate_account(state, transaction.cash_account_id).await?;
    Ok(CashReceiptResponse {
        transaction,
        location,
        payor,
        cash_account,
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

/// GET /api/v1/cash-receipts
pub async fn list(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<CashReceiptResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_TRANSACTIONS))?;

    let rows = CashReceiptRepo::list(&state.pool).await?;
    let mut responses = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(to_response(&state, row).await?);
    }
    Ok(Json(DataResponse::new(responses)))
}

/// GET /api/v1/cash-receipts/deleted
pub async fn list_deleted(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<CashReceiptResponse>>>> {
    user.authorize(&Policy::permission(names::RESTORE_TRANSACTION))?;

    let rows = CashReceiptRepo::list_deleted(&state.pool).await?;
    let mut responses = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(to_response(&state, row).await?);
    }
    Ok(Json(DataResponse::new(responses)))
}

/// POST /api/v1/cash-receipts
pub async fn create(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreateCashReceipt>,
) -> AppResult<(StatusCode, Json<DataResponse<CashReceiptResponse>>)> {
    user.authorize(&Policy::permission(names::CREATE_TRANSACTION))?;

    let row = CashReceiptRepo::create(&state.pool, &input).await?;
    record(&state, &user, row.id, AuditAction::Create).await?;

    let response = to_response(&state, row).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(response))))
}

/// GET /api/v1/cash-receipts/{id}
pub async fn get(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CashReceiptResponse>>> {
    user.authorize(&Policy::permission(names::VIEW_TRANSACTION_BY_ID))?;

    let row = CashReceiptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "CashReceipt", id }))?;
    let response = to_response(&state, row).await?;
    Ok(Json(DataResponse::new(response)))
}

/// PATCH /api/v1/cash-receipts/{id}
pub async fn update(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCashReceipt>,
) -> AppResult<Json<DataResponse<CashReceiptResponse>>> {
    user.authorize(&Policy::permission(names::UPDATE_TRANSACTION))?;

    let row = CashReceiptRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "CashReceipt", id }))?;
    record(&state, &user, id, AuditAction::Update).await?;

    let response = to_response(&state, row).await?;
    Ok(Json(DataResponse::new(response)))
}

/// DELETE /api/v1/cash-receipts/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(&Policy::permission(names::DELETE_TRANSACTION))?;

    let deleted = CashReceiptRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "CashReceipt", id }));
    }
    record(&state, &user, id, AuditAction::Delete).await?;
    Ok(Json(MessageResponse::new("Cash receipt deleted")))
}

/// PATCH /api/v1/cash-receipts/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CashReceiptResponse>>> {
    user.authorize(&Policy::permission(names::RESTORE_TRANSACTION))?;

    let restored = CashReceiptRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound { entity: "CashReceipt", id }));
    }
    record(&state, &user, id, AuditAction::Restore).await?;

    let row = CashReceiptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "CashReceipt", id }))?;
    let response = to_response(&state, row).await?;
    Ok(Json(DataResponse::new(response)))
}
