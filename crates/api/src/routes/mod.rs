pub mod accounts;
pub mod agents;
pub mod auth;
pub mod branches;
pub mod company;
pub mod connection;
pub mod health;
pub mod journals;
pub mod locations;
pub mod permissions;
pub mod roles;
pub mod transaction_logs;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signin                         sign in (service token)
/// /connection                          gated liveness probe (service token)
///
/// /users                               list, create
/// /users/{id}                          get, update
/// /users/{id}/unblock                  lift a block (admin)
///
/// /roles                               list, create
/// /roles/{id}                          get, update, delete (sysadmin)
///
/// /permissions                         list, create
/// /permissions/{id}                    get, update, delete (sysadmin)
///
/// /agents                              list, create (+ /deleted, restore)
/// /branches                            list, create (+ /deleted, restore)
/// /locations                           list, create (+ /deleted, restore)
/// /company-info                        list, create (+ /deleted, restore)
///
/// /accounts                            list, create (+ /deleted, restore)
/// /accounts/permanent                  bulk hard delete (sysadmin)
///
/// /cash-disbursements                  journal CRUD + restore
/// /cash-receipts                       journal CRUD + restore
/// /sales-on-account                    journal CRUD + restore
/// /purchases-on-account                journal CRUD + restore
/// /general-journals                    journal CRUD + restore
///
/// /transaction-logs                    list, create
/// /transaction-logs/deleted            sysadmin trash view
/// /transaction-logs/journal/{kind}     per-kind listing
/// /transaction-logs/journal/{kind}/{journal_id}
///                                      per-record listing
/// /transaction-logs/{id}               get, delete (sysadmin), restore
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (service-token gated).
        .nest("/auth", auth::router())
        // Gated liveness probe.
        .nest("/connection", connection::router())
        // Credential management.
        .nest("/users", users::router())
        // Role registry and permission catalog.
        .nest("/roles", roles::router())
        .nest("/permissions", permissions::router())
        // Master data.
        .nest("/agents", agents::router())
        .nest("/branches", branches::router())
        .nest("/locations", locations::router())
        .nest("/company-info", company::router())
        .nest("/accounts", accounts::router())
        // Transaction journals.
        .nest("/cash-disbursements", journals::cash_disbursements_router())
        .nest("/cash-receipts", journals::cash_receipts_router())
        .nest("/sales-on-account", journals::sales_on_account_router())
        .nest("/purchases-on-account", journals::purchases_on_account_router())
        .nest("/general-journals", journals::general_journals_router())
        // Write-audit trail.
        .nest("/transaction-logs", transaction_logs::router())
}
