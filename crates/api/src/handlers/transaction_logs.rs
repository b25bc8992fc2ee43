//! Handlers for the `/transaction-logs` resource (the write-audit trail).
//!
//! Log reads populate the polymorphic journal reference by dispatching on
//! the stored kind tag to the matching repository, and the acting user from
//! the credential store. Both lookups go through the soft-delete filter, so
//! a deleted journal or user serializes as `null`. Log deletion and
//! restoration stack the sysadmin role gate on top of the capability check.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use ledgerd_core::audit::{AuditAction, JournalKind};
use ledgerd_core::error::CoreError;
use ledgerd_core::permissions::names;
use ledgerd_core::policy::Policy;
use ledgerd_core::roles::ROLE_SYSADMIN;
use ledgerd_core::types::DbId;
use ledgerd_db::models::transaction_log::{
    CreateTransactionLog, TransactionLog, TransactionLogResponse,
};
use ledgerd_db::repositories::{
    CashDisbursementRepo, CashReceiptRepo, GeneralJournalRepo, PurchaseOnAccountRepo,
    SaleOnAccountRepo, TransactionLogRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /transaction-logs`.
///
/// Kind and action arrive as strings and are parsed against the closed tag
/// sets, so an unrecognized value is a validation error before any write.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionLogRequest {
    pub journal_kind: String,
    pub journal_id: DbId,
    pub action: String,
    #[serde(default)]
    pub remarks: String,
}

// ---------------------------------------------------------------------------
// Population helpers
// ---------------------------------------------------------------------------

/// Resolve the polymorphic journal reference via the kind tag. Returns
/// `None` when the journal is absent or soft-deleted.
async fn populate_journal(
    state: &AppState,
    log: &TransactionLog,
) -> AppResult<Option<serde_json::Value>> {
    // Stored tags are validated on write, so a parse failure here means the
    // row predates the tag set; treat it like a missing reference.
    let Ok(kind) = log.journal_kind.parse::<JournalKind>() else {
        return Ok(None);
    };

    let value = match kind {
        JournalKind::CashDisbursement => CashDisbursementRepo::find_by_id(&state.pool, log.journal_id)
            .await?
            .map(serde_json::to_value),
        JournalKind::CashReceipts => CashReceiptRepo::find_by_id(&state.pool, log.journal_id)
            .await?
            .map(serde_json::to_value),
        JournalKind::SalesOnAccount => SaleOnAccountRepo::find_by_id(&state.pool, log.journal_id)
            .await?
            .map(serde_json::to_value),
        JournalKind::PurchaseOnAccount => {
            PurchaseOnAccountRepo::find_by_id(&state.pool, log.journal_id)
                .await?
                .map(serde_json::to_value)
        }
        JournalKind::GeneralJournal => GeneralJournalRepo::find_by_id(&state.pool, log.journal_id)
            .await?
            .map(serde_json::to_value),
    };

    value
        .transpose()
        .map_err(|e| AppError::InternalError(format!("Journal serialization error: {e}")))
}

async fn to_response(state: &AppState, log: TransactionLog) -> AppResult<TransactionLogResponse> {
    let journal = populate_journal(state, &log).await?;
    let acting_user = UserRepo::find_by_id(&state.pool, log.remarks_by)
        .await?
        .map(Into::into);
    Ok(TransactionLogResponse {
        log,
        journal,
        acting_user,
    })
}

async fn to_responses(
    state: &AppState,
    logs: Vec<TransactionLog>,
) -> AppResult<Vec<TransactionLogResponse>> {
    let mut responses = Vec::with_capacity(logs.len());
    for log in logs {
        responses.push(to_response(state, log).await?);
    }
    Ok(responses)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/transaction-logs
pub async fn list_logs(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<TransactionLogResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_TRANSACTION_LOGS))?;

    let logs = TransactionLogRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(to_responses(&state, logs).await?)))
}

/// GET /api/v1/transaction-logs/deleted
pub async fn list_deleted_logs(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<TransactionLogResponse>>>> {
    user.authorize(
        &Policy::role_at_least(ROLE_SYSADMIN).and_permission(names::RESTORE_TRANSACTION_LOG),
    )?;

    let logs = TransactionLogRepo::list_deleted(&state.pool).await?;
    Ok(Json(DataResponse::new(to_responses(&state, logs).await?)))
}

/// GET /api/v1/transaction-logs/journal/{kind}
pub async fn list_logs_by_kind(
    State(state): State<AppState>,
    user: Principal,
    Path(kind): Path<String>,
) -> AppResult<Json<DataResponse<Vec<TransactionLogResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_TRANSACTION_LOGS))?;

    let kind: JournalKind = kind.parse().map_err(AppError::Core)?;
    let logs = TransactionLogRepo::list_by_kind(&state.pool, kind).await?;
    Ok(Json(DataResponse::new(to_responses(&state, logs).await?)))
}

/// GET /api/v1/transaction-logs/journal/{kind}/{journal_id}
pub async fn list_logs_for_journal(
    State(state): State<AppState>,
    user: Principal,
    Path((kind, journal_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<Vec<TransactionLogResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_TRANSACTION_LOGS))?;

    let kind: JournalKind = kind.parse().map_err(AppError::Core)?;
    let logs = TransactionLogRepo::list_by_kind_and_journal(&state.pool, kind, journal_id).await?;
    Ok(Json(DataResponse::new(to_responses(&state, logs).await?)))
}

/// GET /api/v1/transaction-logs/{id}
pub async fn get_log(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TransactionLogResponse>>> {
    user.authorize(&Policy::permission(names::VIEW_TRANSACTION_LOG_BY_ID))?;

    let log = TransactionLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "TransactionLog", id }))?;
    Ok(Json(DataResponse::new(to_response(&state, log).await?)))
}

/// POST /api/v1/transaction-logs
///
/// Record an audit entry directly. The acting user is the authenticated
/// principal, never a body field. The referenced journal id is stored as-is
/// (the reference is resolved polymorphically on read).
pub async fn create_log(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreateTransactionLogRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<TransactionLogResponse>>)> {
    user.authorize(&Policy::permission(names::CREATE_TRANSACTION_LOG))?;

    let journal_kind: JournalKind = input.journal_kind.parse().map_err(AppError::Core)?;
    let action: AuditAction = input.action.parse().map_err(AppError::Core)?;

    let create_dto = CreateTransactionLog {
        journal_kind,
        journal_id: input.journal_id,
        action,
        remarks: input.remarks,
        remarks_by: user.user_id,
    };

    let log = TransactionLogRepo::create(&state.pool, &create_dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(to_response(&state, log).await?)),
    ))
}

/// DELETE /api/v1/transaction-logs/{id}
pub async fn delete_log(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(
        &Policy::role_at_least(ROLE_SYSADMIN).and_permission(names::DELETE_TRANSACTION_LOG),
    )?;

    let deleted = TransactionLogRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(MessageResponse::new("Transaction log deleted")))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "TransactionLog", id }))
    }
}

/// PATCH /api/v1/transaction-logs/{id}/restore
pub async fn restore_log(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TransactionLogResponse>>> {
    user.authorize(
        &Policy::role_at_least(ROLE_SYSADMIN).and_permission(names::RESTORE_TRANSACTION_LOG),
    )?;

    let restored = TransactionLogRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound { entity: "TransactionLog", id }));
    }

    let log = TransactionLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "TransactionLog", id }))?;
    Ok(Json(DataResponse::new(to_response(&state, log).await?)))
}
