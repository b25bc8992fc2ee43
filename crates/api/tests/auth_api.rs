//! HTTP-level integration tests for sign-in, the service-token gate,
//! account blocking, and token authentication.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_test_user, get_auth, patch_auth, post_json, post_json_auth,
    service_token, token_for,
};
use sqlx::PgPool;

use ledgerd_db::models::user::{STATUS_ACTIVE, STATUS_BLOCKED, STATUS_INACTIVE};
use ledgerd_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Service-token gate
// ---------------------------------------------------------------------------

/// Sign-in without any bearer token is rejected by the service gate.
#[sqlx::test(migrations = "../../migrations")]
async fn test_signin_requires_service_token(pool: PgPool) {
    let app = build_test_app(pool).await;

    let body = serde_json::json!({ "email": "a@test.com", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/signin", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A user access token does not pass the service gate (separate namespace).
#[sqlx::test(migrations = "../../migrations")]
async fn test_signin_rejects_user_token_as_service_token(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "wrongns@test.com", "regular").await;
    let app = build_test_app(pool).await;

    let body = serde_json::json!({ "email": user.email, "password": password });
    let response = post_json_auth(app, "/api/v1/auth/signin", body, &token_for(&user)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// The connection probe requires the service token too.
#[sqlx::test(migrations = "../../migrations")]
async fn test_connection_probe_is_gated(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let response = common::get(app, "/api/v1/connection").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = build_test_app(pool).await;
    let response = get_auth(app, "/api/v1/connection", &service_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Sign-in flow
// ---------------------------------------------------------------------------

/// Successful sign-in returns the token and flips the account to active.
#[sqlx::test(migrations = "../../migrations")]
async fn test_signin_success_activates_account(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "signin@test.com", "regular").await;
    assert_eq!(user.status, STATUS_INACTIVE, "accounts start inactive");

    let app = build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "email": "signin@test.com", "password": password });
    let response = post_json_auth(app, "/api/v1/auth/signin", body, &service_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Sign in successful");
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["email"], "signin@test.com");
    assert_eq!(json["user"]["status"], STATUS_ACTIVE);
    assert!(
        json["user"].get("password_hash").is_none(),
        "the password hash must never be serialized"
    );
}

/// Wrong password returns 401 without leaking which part was wrong.
#[sqlx::test(migrations = "../../migrations")]
async fn test_signin_wrong_password(pool: PgPool) {
    let (_user, _password) = create_test_user(&pool, "wrongpw@test.com", "regular").await;
    let app = build_test_app(pool).await;

    let body = serde_json::json!({ "email": "wrongpw@test.com", "password": "Incorrect#1x" });
    let response = post_json_auth(app, "/api/v1/auth/signin", body, &service_token()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid email or password");
}

/// Unknown email gets the same 401 as a wrong password.
#[sqlx::test(migrations = "../../migrations")]
async fn test_signin_unknown_email(pool: PgPool) {
    let app = build_test_app(pool).await;

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever" });
    let response = post_json_auth(app, "/api/v1/auth/signin", body, &service_token()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Missing fields are a validation error with field detail.
#[sqlx::test(migrations = "../../migrations")]
async fn test_signin_missing_fields(pool: PgPool) {
    let app = build_test_app(pool).await;

    let body = serde_json::json!({ "email": "", "password": "" });
    let response = post_json_auth(app, "/api/v1/auth/signin", body, &service_token()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("email is required"));
    assert!(message.contains("password is required"));
}

// ---------------------------------------------------------------------------
// Account blocking (five-strikes)
// ---------------------------------------------------------------------------

/// After five consecutive failed attempts the account is blocked, and the
/// sixth attempt is rejected even with the correct password.
#[sqlx::test(migrations = "../../migrations")]
async fn test_account_blocked_after_five_failures(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "blockme@test.com", "regular").await;

    for _ in 0..5 {
        let app = build_test_app(pool.clone()).await;
        let body = serde_json::json!({ "email": "blockme@test.com", "password": "Wrong#Pass1" });
        let response = post_json_auth(app, "/api/v1/auth/signin", body, &service_token()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // The block landed with its timestamp.
    let blocked = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(blocked.status, STATUS_BLOCKED);
    assert!(blocked.blocked_at.is_some(), "blocked_at must be stamped");
    assert_eq!(blocked.failed_login_attempts, 5);

    // Sixth attempt with the CORRECT password is still rejected.
    let app = build_test_app(pool).await;
    let body = serde_json::json!({ "email": "blockme@test.com", "password": password });
    let response = post_json_auth(app, "/api/v1/auth/signin", body, &service_token()).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Account is blocked");
}

/// A blocked account's still-valid access token stops working immediately.
#[sqlx::test(migrations = "../../migrations")]
async fn test_blocked_user_token_is_rejected(pool: PgPool) {
    let (user, _password) = create_test_user(&pool, "blocked-token@test.com", "sysadmin").await;
    let token = token_for(&user);

    // The token works while the account is in good standing.
    let app = build_test_app(pool.clone()).await;
    let response = get_auth(app, "/api/v1/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Block the account; the same unexpired token must now be rejected.
    UserRepo::block(&pool, user.id).await.unwrap();

    let app = build_test_app(pool).await;
    let response = get_auth(app, "/api/v1/users", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Unblock returns the account to inactive with restored_at stamped, and
/// sign-in works again.
#[sqlx::test(migrations = "../../migrations")]
async fn test_unblock_allows_signin_again(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "unblock@test.com", "regular").await;
    UserRepo::block(&pool, user.id).await.unwrap();

    let (admin, _) = create_test_user(&pool, "admin-unblock@test.com", "sysadmin").await;
    let admin_token = token_for(&admin);

    let app = build_test_app(pool.clone()).await;
    let response = patch_auth(
        app,
        &format!("/api/v1/users/{}/unblock", user.id),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], STATUS_INACTIVE);
    assert!(!json["data"]["restored_at"].is_null(), "restored_at must be stamped");

    let app = build_test_app(pool).await;
    let body = serde_json::json!({ "email": "unblock@test.com", "password": password });
    let response = post_json_auth(app, "/api/v1/auth/signin", body, &service_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Token authentication
// ---------------------------------------------------------------------------

/// Protected routes reject a missing or malformed Authorization header.
#[sqlx::test(migrations = "../../migrations")]
async fn test_protected_route_requires_token(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = common::get(app, "/api/v1/users").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A token signed with a different secret is rejected.
#[sqlx::test(migrations = "../../migrations")]
async fn test_garbage_token_is_rejected(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get_auth(app, "/api/v1/users", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
