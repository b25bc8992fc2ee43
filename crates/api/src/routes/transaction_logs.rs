//! Route definitions for the `/transaction-logs` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::transaction_logs;
use crate::state::AppState;

/// Routes mounted at `/transaction-logs`.
///
/// ```text
/// GET    /                              -> list_logs
/// GET    /deleted                       -> list_deleted_logs (sysadmin)
/// POST   /                              -> create_log
/// GET    /journal/{kind}                -> list_logs_by_kind
/// GET    /journal/{kind}/{journal_id}   -> list_logs_for_journal
/// GET    /{id}                          -> get_log
/// DELETE /{id}                          -> delete_log (sysadmin)
/// PATCH  /{id}/restore                  -> restore_log (sysadmin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(transaction_logs::list_logs).post(transaction_logs::create_log),
        )
        .route("/deleted", get(transaction_logs::list_deleted_logs))
        .route("/journal/{kind}", get(transaction_logs::list_logs_by_kind))
        .route(
            "/journal/{kind}/{journal_id}",
            get(transaction_logs::list_logs_for_journal),
        )
        .route(
            "/{id}",
            get(transaction_logs::get_log).delete(transaction_logs::delete_log),
        )
        .route("/{id}/restore", patch(transaction_logs::restore_log))
}
