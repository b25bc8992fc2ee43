//! Idempotent first-boot seeding.
//!
//! Runs once at process start, after migrations: seeds the permission
//! catalog, the four well-known roles (sysadmin receiving every permission
//! existing at that moment), and a single default sysadmin credential. Every
//! step is guarded by a count check, so re-running is a no-op. Two processes
//! booting an empty database at the same instant can race the count checks;
//! that race only ever inserts the same seed rows and is accepted.

use sqlx::PgPool;

use ledgerd_core::permissions::CATALOG;
use ledgerd_core::roles::{ALL_ROLES, ROLE_SYSADMIN};

use crate::models::user::STATUS_INACTIVE;

/// Identity for the seeded sysadmin credential. The password is hashed by
/// the caller (the api layer owns password hashing).
pub struct DefaultSysadmin<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// What the bootstrap step actually did, for startup logging.
#[derive(Debug, Default)]
pub struct BootstrapReport {
    pub permissions_seeded: u64,
    pub roles_seeded: u64,
    pub sysadmin_grants_seeded: u64,
    pub sysadmin_user_created: bool,
}

/// Ensure the permission catalog, roles, and default sysadmin exist.
pub async fn ensure_bootstrapped(
    pool: &PgPool,
    sysadmin: &DefaultSysadmin<'_>,
) -> Result<BootstrapReport, sqlx::Error> {
    let mut report = BootstrapReport::default();

    // Permission catalog: seed only into an empty table. Catalog rows added
    // in later releases are not back-filled onto existing role grants.
    let permission_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM permissions")
        .fetch_one(pool)
        .await?;

    if permission_count == 0 {
        for entry in CATALOG {
            sqlx::query("INSERT INTO permissions (name, description) VALUES ($1, $2)")
                .bind(entry.name)
                .bind(entry.description)
                .execute(pool)
                .await?;
        }
        report.permissions_seeded = CATALOG.len() as u64;
    }

    // Roles: insert any that are missing.
    for role in ALL_ROLES {
        let result = sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(role)
            .execute(pool)
            .await?;
        report.roles_seeded += result.rows_affected();
    }

    // Sysadmin owns the full catalog as it exists right now. Guarded by the
    // grant count so a re-run never widens a later, intentionally narrowed set.
    let sysadmin_grants: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM role_permissions rp
         JOIN roles r ON r.id = rp.role_id
         WHERE r.name = $1",
    )
    .bind(ROLE_SYSADMIN)
    .fetch_one(pool)
    .await?;

    if sysadmin_grants == 0 {
        let result = sqlx::query(
            "INSERT INTO role_permissions (role_id, permission_id)
             SELECT r.id, p.id FROM roles r CROSS JOIN permissions p
             WHERE r.name = $1
             ON CONFLICT DO NOTHING",
        )
        .bind(ROLE_SYSADMIN)
        .execute(pool)
        .await?;
        report.sysadmin_grants_seeded = result.rows_affected();
    }

    // Default sysadmin credential: only into an empty users table, created
    // inactive like every other account.
    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if user_count == 0 {
        sqlx::query(
            "INSERT INTO users (first_name, last_name, email, password_hash, role, status)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(sysadmin.first_name)
        .bind(sysadmin.last_name)
        .bind(sysadmin.email)
        .bind(sysadmin.password_hash)
        .bind(ROLE_SYSADMIN)
        .bind(STATUS_INACTIVE)
        .execute(pool)
        .await?;
        report.sysadmin_user_created = true;
        tracing::info!(email = %sysadmin.email, "Seeded default sysadmin user");
    }

    Ok(report)
}
