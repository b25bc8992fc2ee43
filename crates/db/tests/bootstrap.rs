//! Integration tests for the idempotent bootstrap seeder.
//!
//! Verifies the fresh-boot guarantees: the full permission catalog is
//! seeded, the four roles exist, sysadmin owns every permission existing at
//! boot, exactly one inactive sysadmin credential is created, and a second
//! run changes nothing.

use sqlx::PgPool;

use ledgerd_core::permissions::CATALOG;
use ledgerd_core::roles::{ALL_ROLES, ROLE_SYSADMIN};
use ledgerd_db::bootstrap::{ensure_bootstrapped, DefaultSysadmin};
use ledgerd_db::models::user::STATUS_INACTIVE;
use ledgerd_db::repositories::{PermissionRepo, RoleRepo, UserRepo};

/// A syntactically valid PHC hash; bootstrap stores it opaquely.
const FAKE_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$aGFzaGhhc2hoYXNoaGFzaA";

fn sysadmin() -> DefaultSysadmin<'static> {
    DefaultSysadmin {
        first_name: "System",
        last_name: "Administrator",
        email: "sysadmin@test.local",
        password_hash: FAKE_HASH,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_fresh_boot_seeds_catalog_roles_and_sysadmin(pool: PgPool) {
    let report = ensure_bootstrapped(&pool, &sysadmin()).await.unwrap();

    assert_eq!(report.permissions_seeded, CATALOG.len() as u64);
    assert_eq!(report.roles_seeded, ALL_ROLES.len() as u64);
    assert!(report.sysadmin_user_created);

    // Every catalog row landed, by name.
    let permissions = PermissionRepo::list(&pool).await.unwrap();
    assert_eq!(permissions.len(), CATALOG.len());
    for entry in CATALOG {
        assert!(
            permissions.iter().any(|p| p.name == entry.name),
            "catalog entry {} should be seeded",
            entry.name
        );
    }

    // All four roles exist.
    let roles = RoleRepo::list(&pool).await.unwrap();
    for role in ALL_ROLES {
        assert!(roles.iter().any(|r| &r.name == role), "role {role} should be seeded");
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_sysadmin_owns_full_catalog_after_boot(pool: PgPool) {
    ensure_bootstrapped(&pool, &sysadmin()).await.unwrap();

    let names = RoleRepo::permission_names_for_role(&pool, ROLE_SYSADMIN)
        .await
        .unwrap()
        .expect("sysadmin role should exist");

    assert_eq!(names.len(), CATALOG.len());
    for entry in CATALOG {
        assert!(
            names.iter().any(|n| n == entry.name),
            "sysadmin should hold {}",
            entry.name
        );
    }

    // The other roles start with no grants.
    let regular = RoleRepo::permission_names_for_role(&pool, "regular")
        .await
        .unwrap()
        .expect("regular role should exist");
    assert!(regular.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_exactly_one_inactive_sysadmin_user(pool: PgPool) {
    ensure_bootstrapped(&pool, &sysadmin()).await.unwrap();

    let users = UserRepo::list(&pool).await.unwrap();
    assert_eq!(users.len(), 1, "fresh boot should create exactly one user");

    let user = &users[0];
    assert_eq!(user.role, ROLE_SYSADMIN);
    assert_eq!(user.status, STATUS_INACTIVE);
    assert_eq!(user.email, "sysadmin@test.local");
    assert_eq!(user.failed_login_attempts, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_second_run_is_a_no_op(pool: PgPool) {
    ensure_bootstrapped(&pool, &sysadmin()).await.unwrap();
    let report = ensure_bootstrapped(&pool, &sysadmin()).await.unwrap();

    assert_eq!(report.permissions_seeded, 0);
    assert_eq!(report.roles_seeded, 0);
    assert_eq!(report.sysadmin_grants_seeded, 0);
    assert!(!report.sysadmin_user_created);

    assert_eq!(PermissionRepo::count(&pool).await.unwrap(), CATALOG.len() as i64);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_existing_users_suppress_default_sysadmin(pool: PgPool) {
    // Seed a user first; bootstrap must then leave users alone.
    use ledgerd_db::models::user::CreateUser;
    UserRepo::create(
        &pool,
        &CreateUser {
            first_name: "Existing".into(),
            last_name: "User".into(),
            middle_initial: None,
            email: "existing@test.local".into(),
            password_hash: FAKE_HASH.into(),
            role: "regular".into(),
        },
    )
    .await
    .unwrap();

    let report = ensure_bootstrapped(&pool, &sysadmin()).await.unwrap();
    assert!(!report.sysadmin_user_created);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}
