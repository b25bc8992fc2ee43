//! Handlers for the `/cash-disbursements` journal.
//!
//! Every successful mutation is followed by a transaction-log write naming
//! the acting principal. The two writes are independent calls with no
//! transactional link; if the log write fails, the mutation stands and the
//! error surfaces to the caller.

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
use ledgerd_db::models::journals::{
    CashDisbursement, CreateCashDisbursement, UpdateCashDisbursement,
};
use ledgerd_db::models::location::LocationResponse;
use ledgerd_db::models::transaction_log::CreateTransactionLog;
use ledgerd_db::repositories::{CashDisbursementRepo, TransactionLogRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{accounts, agents, locations};
use crate::middleware::auth::Principal;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

const KIND: JournalKind = JournalKind::CashDisbursement;

/// A cash disbursement with its references populated. Soft-deleted
/// references serialize as `null`.
#[derive(Debug, Serialize)]
pub struct CashDisbursementResponse {
    #[serde(flatten)]
    pub transaction: CashDisbursement,
    pub location: Option<LocationResponse>,
    pub payee: Option<AgentResponse>,
    pub cash_account: Option<ChartOfAccount>,
}

async fn to_response(
    state: &AppState,
    transaction: CashDisbursement,
) -> AppResult<CashDisbursementResponse> {
    let location = locations::populate_location(state, transaction.location_id).await?;
    let payee = agents::populate_agent(state, transaction.payee_agent_id).await?;
    let cash_account = accounts::populate_account(state, transaction.cash_account_id).await?;
    Ok(CashDisbursementResponse {
        transaction,
        location,
        payee,
        cash_account,
    })
}

/// Record an audit entry for a mutation of this journal.
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

/// GET /api/v1/cash-disbursements
pub async fn list(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<CashDisbursementResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_TRANSACTIONS))?;

    let rows = CashDisbursementRepo::list(&state.pool).await?;
    let mut responses = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(to_response(&state, row).await?);
    }
    Ok(Json(DataResponse::new(responses)))
}

/// GET /api/v1/cash-disbursements/deleted
pub async fn list_deleted(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<CashDisbursementResponse>>>> {
    user.authorize(&Policy::permission(names::RESTORE_TRANSACTION))?;

    let rows = CashDisbursementRepo::list_deleted(&state.pool).await?;
    let mut responses = Vec::with_capacity(rows.len());
    for row in rows {
        responses.push(to_response(&state, row).await?);
    }
    Ok(Json(DataResponse::new(responses)))
}

/// POST /api/v1/cash-disbursements
pub async fn create(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreateCashDisbursement>,
) -> AppResult<(StatusCode, Json<DataResponse<CashDisbursementResponse>>)> {
    user.authorize(&Policy::permission(names::CREATE_TRANSACTION))?;

    let row = CashDisbursementRepo::create(&state.pool, &input).await?;
    record(&state, &user, row.id, AuditAction::Create).await?;

    let response = to_response(&state, row).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(response))))
}

/// GET /api/v1/cash-disbursements/{id}
pub async fn get(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CashDisbursementResponse>>> {
    user.authorize(&Policy::permission(names::VIEW_TRANSACTION_BY_ID))?;

    let row = CashDisbursementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "CashDisbursement", id }))?;
    let response = to_response(&state, row).await?;
    Ok(Json(DataResponse::new(response)))
}

/// PATCH /api/v1/cash-disbursements/{id}
pub async fn update(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCashDisbursement>,
) -> AppResult<Json<DataResponse<CashDisbursementResponse>>> {
    user.authorize(&Policy::permission(names::UPDATE_TRANSACTION))?;

    let row = CashDisbursementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "CashDisbursement", id }))?;
    record(&state, &user, id, AuditAction::Update).await?;

    let response = to_response(&state, row).await?;
    Ok(Json(DataResponse::new(response)))
}

/// DELETE /api/v1/cash-disbursements/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(&Policy::permission(names::DELETE_TRANSACTION))?;

    let deleted = CashDisbursementRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "CashDisbursement", id }));
    }
    record(&state, &user, id, AuditAction::Delete).await?;
    Ok(Json(MessageResponse::new("Cash disbursement deleted")))
}

/// PATCH /api/v1/cash-disbursements/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CashDisbursementResponse>>> {
    user.authorize(&Policy::permission(names::RESTORE_TRANSACTION))?;

    let restored = CashDisbursementRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound { entity: "CashDisbursement", id }));
    }
    record(&state, &user, id, AuditAction::Restore).await?;

    let row = CashDisbursementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "CashDisbursement", id }))?;
    let response = to_response(&state, row).await?;
    Ok(Json(DataResponse::new(response)))
}
