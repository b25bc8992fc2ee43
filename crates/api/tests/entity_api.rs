//! HTTP-level integration tests for master-data entities: TIN encryption at
//! the store boundary, uniqueness conflicts, the soft-delete lifecycle, and
//! null-out-on-read population.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_test_user, delete_auth, get_auth, patch_auth,
    post_json_auth, token_for,
};
use sqlx::PgPool;

use ledgerd_db::repositories::BranchRepo;

async fn sysadmin_token(pool: &PgPool) -> String {
    let (user, _) = create_test_user(pool, "entity-admin@test.com", "sysadmin").await;
    token_for(&user)
}

// ---------------------------------------------------------------------------
// TIN handling
// ---------------------------------------------------------------------------

/// The response carries the plaintext TIN; the stored row does not.
#[sqlx::test(migrations = "../../migrations")]
async fn test_branch_tin_encrypted_at_rest_decrypted_in_response(pool: PgPool) {
    let token = sysadmin_token(&pool).await;
    let app = build_test_app(pool.clone()).await;

    let body = serde_json::json!({
        "name": "Main Branch",
        "address": "1 Ledger Street",
        "tin": "123456789012",
        "machine_id": "M-01",
    });
    let response = post_json_auth(app, "/api/v1/branches", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["tin"], "123456789012");
    let id = json["data"]["id"].as_i64().unwrap();

    // At rest, the column holds ciphertext, not the plaintext.
    let row = BranchRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_ne!(row.tin, "123456789012");
    assert!(!row.tin_digest.is_empty());

    // Reading it back decrypts again.
    let app = build_test_app(pool).await;
    let response = get_auth(app, &format!("/api/v1/branches/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["tin"], "123456789012");
}

/// A second live branch with the same TIN is a conflict.
#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_branch_tin_conflicts(pool: PgPool) {
    let token = sysadmin_token(&pool).await;

    let body = serde_json::json!({
        "name": "First",
        "address": "1 Street",
        "tin": "111222333444",
    });
    let app = build_test_app(pool.clone()).await;
    let response = post_json_auth(app, "/api/v1/branches", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({
        "name": "Second",
        "address": "2 Street",
        "tin": "111222333444",
    });
    let app = build_test_app(pool).await;
    let response = post_json_auth(app, "/api/v1/branches", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["message"], "Branch TIN already exists");
}

/// Deleting the holder frees its TIN for a new record.
#[sqlx::test(migrations = "../../migrations")]
async fn test_deleted_branch_frees_its_tin(pool: PgPool) {
    let token = sysadmin_token(&pool).await;

    let body = serde_json::json!({ "name": "Old", "address": "1 St", "tin": "555666777888" });
    let app = build_test_app(pool.clone()).await;
    let response = post_json_auth(app, "/api/v1/branches", body, &token).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone()).await;
    delete_auth(app, &format!("/api/v1/branches/{id}"), &token).await;

    let body = serde_json::json!({ "name": "New", "address": "2 St", "tin": "555666777888" });
    let app = build_test_app(pool).await;
    let response = post_json_auth(app, "/api/v1/branches", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Soft-delete lifecycle over HTTP
// ---------------------------------------------------------------------------

/// Delete -> 404 on read -> restore -> visible again with both stamps set.
#[sqlx::test(migrations = "../../migrations")]
async fn test_branch_delete_restore_round_trip(pool: PgPool) {
    let token = sysadmin_token(&pool).await;

    let body = serde_json::json!({ "name": "Round Trip", "address": "3 St", "tin": "999000111222" });
    let app = build_test_app(pool.clone()).await;
    let response = post_json_auth(app, "/api/v1/branches", body, &token).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Delete hides it from normal reads.
    let app = build_test_app(pool.clone()).await;
    let response = delete_auth(app, &format!("/api/v1/branches/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool.clone()).await;
    let response = get_auth(app, &format!("/api/v1/branches/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // It shows up in the trash view.
    let app = build_test_app(pool.clone()).await;
    let response = get_auth(app, "/api/v1/branches/deleted", &token).await;
    let json = body_json(response).await;
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["id"].as_i64() == Some(id)));

    // Restore brings it back with both lifecycle stamps.
    let app = build_test_app(pool.clone()).await;
    let response = patch_auth(app, &format!("/api/v1/branches/{id}/restore"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Round Trip");
    assert!(!json["data"]["deleted_at"].is_null(), "deleted_at is kept after restore");
    assert!(!json["data"]["restored_at"].is_null());

    let app = build_test_app(pool).await;
    let response = get_auth(app, &format!("/api/v1/branches/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Restoring an entity that is not deleted reports NOT_FOUND.
#[sqlx::test(migrations = "../../migrations")]
async fn test_restore_active_branch_is_not_found(pool: PgPool) {
    let token = sysadmin_token(&pool).await;

    let body = serde_json::json!({ "name": "Active", "address": "4 St", "tin": "121212121212" });
    let app = build_test_app(pool.clone()).await;
    let response = post_json_auth(app, "/api/v1/branches", body, &token).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool).await;
    let response = patch_auth(app, &format!("/api/v1/branches/{id}/restore"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Null-out-on-read population
// ---------------------------------------------------------------------------

/// A location keeps serving after its branch is deleted, with the branch
/// reference nulled out instead of leaking deleted master data.
#[sqlx::test(migrations = "../../migrations")]
async fn test_location_nulls_out_deleted_branch(pool: PgPool) {
    let token = sysadmin_token(&pool).await;

    let body = serde_json::json!({ "name": "HQ", "address": "5 St", "tin": "313131313131" });
    let app = build_test_app(pool.clone()).await;
    let response = post_json_auth(app, "/api/v1/branches", body, &token).await;
    let branch_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let body = serde_json::json!({
        "name": "Front Office",
        "address": "5 St Unit 2",
        "tin": "414141414141",
        "branch_id": branch_id,
    });
    let app = build_test_app(pool.clone()).await;
    let response = post_json_auth(app, "/api/v1/locations", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let location_id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["branch"]["id"].as_i64(), Some(branch_id));

    // Delete the branch; the location must keep reading, branch as null.
    let app = build_test_app(pool.clone()).await;
    delete_auth(app, &format!("/api/v1/branches/{branch_id}"), &token).await;

    let app = build_test_app(pool).await;
    let response = get_auth(app, &format!("/api/v1/locations/{location_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(
        json["data"]["branch"].is_null(),
        "a deleted branch must not leak through the populated reference"
    );
}

/// Creating a location against an unknown branch is a validation error.
#[sqlx::test(migrations = "../../migrations")]
async fn test_location_with_unknown_branch_rejected(pool: PgPool) {
    let token = sysadmin_token(&pool).await;
    let app = build_test_app(pool).await;

    let body = serde_json::json!({
        "name": "Orphan",
        "address": "6 St",
        "tin": "515151515151",
        "branch_id": 424242,
    });
    let response = post_json_auth(app, "/api/v1/locations", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Chart of accounts escape hatch
// ---------------------------------------------------------------------------

/// The permanent bulk delete removes everything, soft-deleted or not, and is
/// closed to non-sysadmin principals.
#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_all_accounts_permanently(pool: PgPool) {
    let token = sysadmin_token(&pool).await;

    for code in ["1000", "2000"] {
        let body = serde_json::json!({ "account_code": code, "account_name": format!("Account {code}") });
        let app = build_test_app(pool.clone()).await;
        let response = post_json_auth(app, "/api/v1/accounts", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Not even a deleted row survives the purge.
    let app = build_test_app(pool.clone()).await;
    let response = get_auth(app, "/api/v1/accounts", &token).await;
    let first_id = body_json(response).await["data"][0]["id"].as_i64().unwrap();
    let app = build_test_app(pool.clone()).await;
    delete_auth(app, &format!("/api/v1/accounts/{first_id}"), &token).await;

    // A non-sysadmin (admin role) is stopped by the role gate.
    let (admin, _) = create_test_user(&pool, "accounts-admin@test.com", "admin").await;
    let app = build_test_app(pool.clone()).await;
    let response = delete_auth(app, "/api/v1/accounts/permanent", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(pool.clone()).await;
    let response = delete_auth(app, "/api/v1/accounts/permanent", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool.clone()).await;
    let response = get_auth(app, "/api/v1/accounts", &token).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());

    let app = build_test_app(pool).await;
    let response = get_auth(app, "/api/v1/accounts/deleted", &token).await;
    assert!(
        body_json(response).await["data"].as_array().unwrap().is_empty(),
        "the purge bypasses the soft-delete state machine entirely"
    );
}
