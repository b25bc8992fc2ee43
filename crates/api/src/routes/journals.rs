//! Route definitions for the five transaction journals.
//!
//! Each journal mounts the same shape:
//!
//! ```text
//! GET    /               -> list
//! GET    /deleted        -> list_deleted
//! POST   /               -> create
//! GET    /{id}           -> get
//! PATCH  /{id}           -> update
//! DELETE /{id}           -> delete
//! PATCH  /{id}/restore   -> restore
//! ```

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{
    cash_disbursements, cash_receipts, general_journals, purchases_on_account, sales_on_account,
};
use crate::state::AppState;

/// Routes mounted at `/cash-disbursements`.
pub fn cash_disbursements_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(cash_disbursements::list).post(cash_disbursements::create),
        )
        .route("/deleted", get(cash_disbursements::list_deleted))
        .route(
            "/{id}",
            get(cash_disbursements::get)
                .patch(cash_disbursements::update)
                .delete(cash_disbursements::delete),
        )
        .route("/{id}/restore", patch(cash_disbursements::restore))
}

/// Routes mounted at `/cash-receipts`.
pub fn cash_receipts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(cash_receipts::list).post(cash_receipts::create))
        .route("/deleted", get(cash_receipts::list_deleted))
        .route(
            "/{id}",
            get(cash_receipts::get)
                .patch(cash_receipts::update)
                .delete(cash_receipts::delete),
        )
        .route("/{id}/restore", patch(cash_receipts::restore))
}

/// Routes mounted at `/sales-on-account`.
pub fn sales_on_account_router() -> Router<AppState> {
    Router::new()
        .route("/", get(sales_on_account::list).post(sales_on_account::create))
        .route("/deleted", get(sales_on_account::list_deleted))
        .route(
            "/{id}",
            get(sales_on_account::get)
                .patch(sales_on_account::update)
                .delete(sales_on_account::delete),
        )
        .route("/{id}/restore", patch(sales_on_account::restore))
}

/// Routes mounted at `/purchases-on-account`.
pub fn purchases_on_account_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(purchases_on_account::list).post(purchases_on_account::create),
        )
        .route("/deleted", get(purchases_on_account::list_deleted))
        .route(
            "/{id}",
            get(purchases_on_account::get)
                .patch(purchases_on_account::update)
                .delete(purchases_on_account::delete),
        )
        .route("/{id}/restore", patch(purchases_on_account::restore))
}

/// Routes mounted at `/general-journals`.
pub fn general_journals_router() -> Router<AppState> {
    Router::new()
        .route("/", get(general_journals::list).post(general_journals::create))
        .route("/deleted", get(general_journals::list_deleted))
        .route(
            "/{id}",
            get(general_journals::get)
                .patch(general_journals::update)
                .delete(general_journals::delete),
        )
        .route("/{id}/restore", patch(general_journals::restore))
}
