//! Route definitions for the `/accounts` resource (chart of accounts).

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::accounts;
use crate::state::AppState;

/// Routes mounted at `/accounts`.
///
/// ```text
/// GET    /               -> list_accounts
/// GET    /deleted        -> list_deleted_accounts
/// POST   /               -> create_account
/// DELETE /permanent      -> delete_all_accounts_permanently (sysadmin)
/// GET    /{id}           -> get_account
/// PATCH  /{id}           -> update_account
/// DELETE /{id}           -> delete_account
/// PATCH  /{id}/restore   -> restore_account
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(accounts::list_accounts).post(accounts::create_account))
        .route("/deleted", get(accounts::list_deleted_accounts))
        .route("/permanent", delete(accounts::delete_all_accounts_permanently))
        .route(
            "/{id}",
            get(accounts::get_account)
                .patch(accounts::update_account)
                .delete(accounts::delete_account),
        )
        .route("/{id}/restore", patch(accounts::restore_account))
}
