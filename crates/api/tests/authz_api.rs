//! HTTP-level integration tests for the authorization policy engine:
//! capability checks, stacked role gates, and denial side-effect freedom.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_test_user, delete_auth, get_auth, token_for};
use sqlx::PgPool;

use ledgerd_db::models::agent::CreateAgent;
use ledgerd_db::repositories::{AgentRepo, BranchRepo, PermissionRepo, RoleRepo};

async fn seed_agent(pool: &PgPool, code: &str, digest: &str) -> i64 {
    AgentRepo::create(
        pool,
        &CreateAgent {
            agent_code: code.to_string(),
            tin: format!("ciphertext-{digest}"),
            tin_digest: digest.to_string(),
            tax_classification: "individual".to_string(),
            registered_name: "Registered".to_string(),
            agent_name: "Agent".to_string(),
            trade_name: "Trade".to_string(),
            agent_type: "customer".to_string(),
            registration_type: "vat".to_string(),
            authorized_representative: None,
            address: "789 Authz Road".to_string(),
            email: None,
            phone: None,
            fax: None,
            website: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// A `regular` principal without `deleteAgent` gets 403 naming the missing
/// capability, and the agent is untouched.
#[sqlx::test(migrations = "../../migrations")]
async fn test_missing_permission_is_forbidden_and_side_effect_free(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "regular@test.com", "regular").await;
    let agent_id = seed_agent(&pool, "A-100", "authz-d1").await;

    let app = build_test_app(pool.clone()).await;
    let response = delete_auth(app, &format!("/api/v1/agents/{agent_id}"), &token_for(&user)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "FORBIDDEN");
    assert!(
        json["message"].as_str().unwrap().contains("deleteAgent"),
        "the denial must name the missing capability"
    );

    // The agent is still active.
    let agent = AgentRepo::find_by_id(&pool, agent_id).await.unwrap();
    assert!(agent.is_some(), "denied delete must leave the agent untouched");
    assert!(!agent.unwrap().is_deleted);
}

/// The sysadmin role, bootstrapped with the full catalog, passes the same
/// capability check.
#[sqlx::test(migrations = "../../migrations")]
async fn test_sysadmin_holds_every_capability(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "sysadmin-all@test.com", "sysadmin").await;
    let agent_id = seed_agent(&pool, "A-101", "authz-d2").await;

    let app = build_test_app(pool.clone()).await;
    let response = delete_auth(app, &format!("/api/v1/agents/{agent_id}"), &token_for(&user)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(AgentRepo::find_by_id(&pool, agent_id).await.unwrap().is_none());
}

/// Deleting an already-deleted entity reports NOT_FOUND, never a silent
/// second success.
#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_already_deleted_is_not_found(pool: PgPool) {
    use ledgerd_db::models::branch::CreateBranch;
    let (user, _) = create_test_user(&pool, "sysadmin-del@test.com", "sysadmin").await;

    let branch = BranchRepo::create(
        &pool,
        &CreateBranch {
            name: "Twice Deleted".to_string(),
            address: "1 Main".to_string(),
            tin: "ciphertext-x".to_string(),
            tin_digest: "authz-d3".to_string(),
            machine_id: None,
        },
    )
    .await
    .unwrap();

    let token = token_for(&user);
    let app = build_test_app(pool.clone()).await;
    let response = delete_auth(app, &format!("/api/v1/branches/{}", branch.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool).await;
    let response = delete_auth(app, &format!("/api/v1/branches/{}", branch.id), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

/// Routes stacking a role gate on a capability: holding the capability is
/// not enough when the role gate fails, and vice versa.
#[sqlx::test(migrations = "../../migrations")]
async fn test_stacked_role_and_permission_gates(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;

    // Build an `admin`-role grant set that includes deleteRole, so the only
    // thing standing between this user and the route is the sysadmin gate.
    let delete_role_perm = PermissionRepo::find_by_name(&pool, "deleteRole")
        .await
        .unwrap()
        .expect("catalog should contain deleteRole");
    let admin_role = RoleRepo::find_by_name(&pool, "admin").await.unwrap().unwrap();
    let grant_ids = vec![delete_role_perm.id];
    RoleRepo::update(&pool, admin_role.id, None, Some(grant_ids.as_slice()))
        .await
        .unwrap();

    let (admin, _) = create_test_user(&pool, "admin-gate@test.com", "admin").await;
    let target = RoleRepo::create(&pool, "doomed-role", &[]).await.unwrap();

    let response = delete_auth(
        app,
        &format!("/api/v1/roles/{}", target.id),
        &token_for(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert!(
        json["message"].as_str().unwrap().contains("sysadmin"),
        "the denial must name the failing role gate"
    );

    // Sysadmin passes both predicates.
    let (sysadmin, _) = create_test_user(&pool, "sysadmin-gate@test.com", "sysadmin").await;
    let app = build_test_app(pool).await;
    let response = delete_auth(
        app,
        &format!("/api/v1/roles/{}", target.id),
        &token_for(&sysadmin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A principal whose stored role no longer resolves has no permissions.
#[sqlx::test(migrations = "../../migrations")]
async fn test_unresolvable_role_has_no_permissions(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "orphan-role@test.com", "defunct-role").await;

    let app = build_test_app(pool).await;
    let response = get_auth(app, "/api/v1/agents", &token_for(&user)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
