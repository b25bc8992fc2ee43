//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` mirrors the production router construction (same
//! middleware stack) on top of a bootstrapped database, with fixed test
//! secrets so tokens can be minted without environment variables.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use ledgerd_api::auth::jwt::{
    generate_access_token, generate_service_token, JwtConfig, ServiceTokenConfig,
};
use ledgerd_api::auth::password::hash_password;
use ledgerd_api::config::ServerConfig;
use ledgerd_api::router::build_app_router;
use ledgerd_api::state::AppState;
use ledgerd_db::bootstrap::{ensure_bootstrapped, DefaultSysadmin};
use ledgerd_db::models::user::{CreateUser, User};
use ledgerd_db::repositories::UserRepo;

/// Build a test `ServerConfig` with fixed secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-jwt-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        service: ServiceTokenConfig {
            secret: "test-service-token-secret".to_string(),
            security_token: "test-security-token-constant".to_string(),
        },
        crypto_secret: "test-crypto-secret".to_string(),
    }
}

/// Bootstrap the database (catalog, roles, default sysadmin) and build the
/// full application router with all middleware layers.
pub async fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let hash = hash_password("Sysadmin#Passw0rd").expect("hashing should succeed");
    ensure_bootstrapped(
        &pool,
        &DefaultSysadmin {
            first_name: "System",
            last_name: "Administrator",
            email: "sysadmin@test.local",
            password_hash: &hash,
        },
    )
    .await
    .expect("bootstrap should succeed");

    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Token helpers
// ---------------------------------------------------------------------------

/// Mint a service token accepted by the sign-in / connection gates.
pub fn service_token() -> String {
    generate_service_token(&test_config().service).expect("service token generation")
}

/// Mint a user access token for the given user.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.email, &test_config().jwt)
        .expect("access token generation")
}

/// Create a test user directly in the database. Returns the user row and
/// the plaintext password used.
pub async fn create_test_user(pool: &PgPool, email: &str, role: &str) -> (User, String) {
    let password = "Test#Passw0rd1";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        middle_initial: None,
        email: email.to_string(),
        password_hash: hashed,
        role: role.to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn patch_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("PATCH")
        .uri(path)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn patch_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("PATCH")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
