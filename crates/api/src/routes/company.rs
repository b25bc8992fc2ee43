//! Route definitions for the `/company-info` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::company;
use crate::state::AppState;

/// Routes mounted at `/company-info`.
///
/// ```text
/// GET    /               -> list_company_info
/// GET    /deleted        -> list_deleted_company_info
/// POST   /               -> create_company_info
/// GET    /{id}           -> get_company_info
/// PATCH  /{id}           -> update_company_info
/// DELETE /{id}           -> delete_company_info
/// PATCH  /{id}/restore   -> restore_company_info
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(company::list_company_info).post(company::create_company_info),
        )
        .route("/deleted", get(company::list_deleted_company_info))
        .route(
            "/{id}",
            get(company::get_company_info)
                .patch(company::update_company_info)
                .delete(company::delete_company_info),
        )
        .route("/{id}/restore", patch(company::restore_company_info))
}
