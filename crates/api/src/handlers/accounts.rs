//! Handlers for the `/accounts` resource (chart of accounts).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use ledgerd_core::error::CoreError;
use ledgerd_core::permissions::names;
use ledgerd_core::policy::Policy;
use ledgerd_core::roles::ROLE_SYSADMIN;
use ledgerd_core::types::DbId;
use ledgerd_db::models::account::{ChartOfAccount, CreateChartOfAccount, UpdateChartOfAccount};
use ledgerd_db::repositories::ChartOfAccountRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// An account with its parent populated. A soft-deleted parent serializes as
/// `null` rather than leaking deleted master data.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    #[serde(flatten)]
    pub account: ChartOfAccount,
    pub parent_account: Option<ChartOfAccount>,
}

// ---------------------------------------------------------------------------
// Population helper
// ---------------------------------------------------------------------------

/// Populate a journal's cash-account reference through the soft-delete
/// filter (deleted account -> `null`).
pub(crate) async fn populate_account(
    state: &AppState,
    account_id: Option<DbId>,
) -> AppResult<Option<ChartOfAccount>> {
    let Some(id) = account_id else {
        return Ok(None);
    };
    Ok(ChartOfAccountRepo::find_by_id(&state.pool, id).await?)
}

async fn to_response(state: &AppState, account: ChartOfAccount) -> AppResult<AccountResponse> {
    let parent_account = populate_account(state, account.parent_account_id).await?;
    Ok(AccountResponse {
        account,
        parent_account,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<AccountResponse>>>> {
    user.authorize(&Policy::permission(names::VIEW_ALL_ACCOUNTS))?;

    let accounts = ChartOfAccountRepo::list(&state.pool).await?;
    let mut responses = Vec::with_capacity(accounts.len());
    for account in accounts {
        responses.push(to_response(&state, account).await?);
    }
    Ok(Json(DataResponse::new(responses)))
}

/// GET /api/v1/accounts/deleted
pub async fn list_deleted_accounts(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<DataResponse<Vec<ChartOfAccount>>>> {
    user.authorize(&Policy::permission(names::RESTORE_ACCOUNT))?;

    let accounts = ChartOfAccountRepo::list_deleted(&state.pool).await?;
    Ok(Json(DataResponse::new(accounts)))
}

/// POST /api/v1/accounts
pub async fn create_account(
    State(state): State<AppState>,
    user: Principal,
    Json(input): Json<CreateChartOfAccount>,
) -> AppResult<(StatusCode, Json<DataResponse<AccountResponse>>)> {
    user.authorize(&Policy::permission(names::CREATE_ACCOUNT))?;

    if input.account_code.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation("Account code is required".into())));
    }

    // Racy pre-check by design (see the concurrency notes in DESIGN.md).
    if ChartOfAccountRepo::find_by_account_code(&state.pool, &input.account_code, None)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict("Account code already exists".into())));
    }

    if let Some(parent_id) = input.parent_account_id {
        if ChartOfAccountRepo::find_by_id(&state.pool, parent_id).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown parent account: {parent_id}"
            ))));
        }
    }

    let account = ChartOfAccountRepo::create(&state.pool, &input).await?;
    let response = to_response(&state, account).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(response))))
}

/// GET /api/v1/accounts/{id}
pub async fn get_account(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AccountResponse>>> {
    user.authorize(&Policy::permission(names::VIEW_ACCOUNT_BY_ID))?;

    let account = ChartOfAccountRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "ChartOfAccount", id }))?;
    let response = to_response(&state, account).await?;
    Ok(Json(DataResponse::new(response)))
}

/// PATCH /api/v1/accounts/{id}
pub async fn update_account(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChartOfAccount>,
) -> AppResult<Json<DataResponse<AccountResponse>>> {
    user.authorize(&Policy::permission(names::UPDATE_ACCOUNT))?;

    if let Some(ref code) = input.account_code {
        if ChartOfAccountRepo::find_by_account_code(&state.pool, code, Some(id))
            .await?
            .is_some()
        {
            return Err(AppError::Core(CoreError::Conflict("Account code already exists".into())));
        }
    }

    if let Some(parent_id) = input.parent_account_id {
        if ChartOfAccountRepo::find_by_id(&state.pool, parent_id).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown parent account: {parent_id}"
            ))));
        }
    }

    let account = ChartOfAccountRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "ChartOfAccount", id }))?;
    let response = to_response(&state, account).await?;
    Ok(Json(DataResponse::new(response)))
}

/// DELETE /api/v1/accounts/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(&Policy::permission(names::DELETE_ACCOUNT))?;

    let deleted = ChartOfAccountRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        Ok(Json(MessageResponse::new("Account deleted")))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "ChartOfAccount", id }))
    }
}

/// PATCH /api/v1/accounts/{id}/restore
pub async fn restore_account(
    State(state): State<AppState>,
    user: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AccountResponse>>> {
    user.authorize(&Policy::permission(names::RESTORE_ACCOUNT))?;

    let restored = ChartOfAccountRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound { entity: "ChartOfAccount", id }));
    }

    let account = ChartOfAccountRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "ChartOfAccount", id }))?;
    let response = to_response(&state, account).await?;
    Ok(Json(DataResponse::new(response)))
}

/// DELETE /api/v1/accounts/permanent
///
/// Irreversible bulk hard delete of the entire chart of accounts, deleted or
/// not. Bypasses the soft-delete state machine; sysadmin only.
pub async fn delete_all_accounts_permanently(
    State(state): State<AppState>,
    user: Principal,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(
        &Policy::role_at_least(ROLE_SYSADMIN)
            .and_permission(names::DELETE_ALL_ACCOUNTS_PERMANENTLY),
    )?;

    let removed = ChartOfAccountRepo::delete_all_permanently(&state.pool).await?;
    tracing::warn!(removed, user_id = user.user_id, "Chart of accounts permanently deleted");
    Ok(Json(MessageResponse::new(format!(
        "Permanently deleted {removed} account(s)"
    ))))
}
