//! HTTP-level integration tests for journal mutations and the audit trail:
//! every mutation leaves a log entry, the polymorphic reference populates
//! (and nulls out once the journal is deleted), and log lifecycle routes are
//! sysadmin-gated.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_test_user, delete_auth, get_auth, patch_auth,
    post_json_auth, token_for,
};
use sqlx::PgPool;

async fn sysadmin_token(pool: &PgPool) -> String {
    let (user, _) = create_test_user(pool, "log-admin@test.com", "sysadmin").await;
    token_for(&user)
}

fn disbursement_body(cv_no: &str) -> serde_json::Value {
    serde_json::json!({
        "date": "2026-04-01",
        "month": "April",
        "year": "2026",
        "cv_no": cv_no,
        "particular": "Office supplies",
        "total_debit": "500.00",
        "total_credit": "500.00",
    })
}

/// Creating a journal record leaves exactly one CREATE log entry, fully
/// populated with the journal and the acting user.
#[sqlx::test(migrations = "../../migrations")]
async fn test_create_leaves_one_populated_log_entry(pool: PgPool) {
    let token = sysadmin_token(&pool).await;

    let app = build_test_app(pool.clone()).await;
    let response =
        post_json_auth(app, "/api/v1/cash-disbursements", disbursement_body("CV-001"), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool).await;
    let response = get_auth(
        app,
        &format!("/api/v1/transaction-logs/journal/CashDisbursementTransaction/{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let logs = json["data"].as_array().unwrap();
    assert_eq!(logs.len(), 1, "exactly one log entry for the new journal");
    assert_eq!(logs[0]["action"], "CREATE");
    assert_eq!(logs[0]["journal_kind"], "CashDisbursementTransaction");
    assert_eq!(logs[0]["journal"]["cv_no"], "CV-001");
    assert_eq!(logs[0]["acting_user"]["email"], "log-admin@test.com");
}

/// Update, delete, and restore each add their own log entry; after the
/// journal is deleted its populated reference nulls out.
#[sqlx::test(migrations = "../../migrations")]
async fn test_mutation_trail_and_null_out_after_delete(pool: PgPool) {
    let token = sysadmin_token(&pool).await;

    let app = build_test_app(pool.clone()).await;
    let response =
        post_json_auth(app, "/api/v1/cash-disbursements", disbursement_body("CV-002"), &token).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "particular": "Corrected particulars" });
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/cash-disbursements/{id}"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool.clone()).await;
    let response = delete_auth(app, &format!("/api/v1/cash-disbursements/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // CREATE + UPDATE + DELETE so far; the journal itself is now deleted, so
    // every entry's populated reference reads as null.
    let app = build_test_app(pool.clone()).await;
    let response = get_auth(
        app,
        &format!("/api/v1/transaction-logs/journal/CashDisbursementTransaction/{id}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let logs = json["data"].as_array().unwrap();
    assert_eq!(logs.len(), 3);
    let actions: Vec<&str> = logs.iter().map(|l| l["action"].as_str().unwrap()).collect();
    assert!(actions.contains(&"CREATE"));
    assert!(actions.contains(&"UPDATE"));
    assert!(actions.contains(&"DELETE"));
    assert!(
        logs.iter().all(|l| l["journal"].is_null()),
        "a deleted journal must not leak through the populated reference"
    );

    // Restore adds a fourth entry and the reference populates again.
    let app = build_test_app(pool.clone()).await;
    let response = patch_auth(
        app,
        &format!("/api/v1/cash-disbursements/{id}/restore"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool).await;
    let response = get_auth(
        app,
        &format!("/api/v1/transaction-logs/journal/CashDisbursementTransaction/{id}"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let logs = json["data"].as_array().unwrap();
    assert_eq!(logs.len(), 4);
    assert!(logs.iter().any(|l| l["action"] == "RESTORE"));
    assert!(logs.iter().all(|l| !l["journal"].is_null()));
}

/// An unrecognized journal kind in the path is a validation error.
#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_journal_kind_is_rejected(pool: PgPool) {
    let token = sysadmin_token(&pool).await;
    let app = build_test_app(pool).await;

    let response = get_auth(app, "/api/v1/transaction-logs/journal/PettyCash", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("Invalid transaction type"));
}

/// Direct log creation validates the kind/action tags and stamps the acting
/// principal, never a body-supplied user.
#[sqlx::test(migrations = "../../migrations")]
async fn test_direct_log_creation(pool: PgPool) {
    let token = sysadmin_token(&pool).await;

    // Bad action tag -> validation error, nothing written.
    let body = serde_json::json!({
        "journal_kind": "GeneralJournal",
        "journal_id": 7,
        "action": "ARCHIVE",
    });
    let app = build_test_app(pool.clone()).await;
    let response = post_json_auth(app, "/api/v1/transaction-logs", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Valid entry with remarks.
    let body = serde_json::json!({
        "journal_kind": "GeneralJournal",
        "journal_id": 7,
        "action": "UPDATE",
        "remarks": "manual correction",
    });
    let app = build_test_app(pool).await;
    let response = post_json_auth(app, "/api/v1/transaction-logs", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["remarks"], "manual correction");
    assert_eq!(json["data"]["acting_user"]["email"], "log-admin@test.com");
    // journal_id 7 references nothing; the reference populates as null.
    assert!(json["data"]["journal"].is_null());
}

/// Log delete/restore stack the sysadmin role gate; an admin-role user is
/// stopped even before the capability check.
#[sqlx::test(migrations = "../../migrations")]
async fn test_log_lifecycle_is_sysadmin_gated(pool: PgPool) {
    let token = sysadmin_token(&pool).await;

    let app = build_test_app(pool.clone()).await;
    let response =
        post_json_auth(app, "/api/v1/cash-disbursements", disbursement_body("CV-003"), &token).await;
    let journal_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone()).await;
    let response = get_auth(
        app,
        &format!("/api/v1/transaction-logs/journal/CashDisbursementTransaction/{journal_id}"),
        &token,
    )
    .await;
    let log_id = body_json(response).await["data"][0]["id"].as_i64().unwrap();

    let (admin, _) = create_test_user(&pool, "log-nonsys@test.com", "admin").await;
    let app = build_test_app(pool.clone()).await;
    let response = delete_auth(
        app,
        &format!("/api/v1/transaction-logs/{log_id}"),
        &token_for(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Sysadmin can delete, see it in the trash view, and restore it.
    let app = build_test_app(pool.clone()).await;
    let response = delete_auth(app, &format!("/api/v1/transaction-logs/{log_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool.clone()).await;
    let response = get_auth(app, "/api/v1/transaction-logs/deleted", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["id"].as_i64() == Some(log_id)));

    let app = build_test_app(pool).await;
    let response = patch_auth(
        app,
        &format!("/api/v1/transaction-logs/{log_id}/restore"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(!json["data"]["deleted_at"].is_null());
    assert!(!json["data"]["restored_at"].is_null());
}
