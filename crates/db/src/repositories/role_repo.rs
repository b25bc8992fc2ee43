//! Repository for the `roles` and `role_permissions` tables.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::permission::Permission;
use crate::models::role::{Role, RoleWithPermissions};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Column list for permissions joined through `role_permissions`.
const PERMISSION_COLUMNS: &str = "p.id, p.name, p.description, p.created_at, p.updated_at";

/// Provides CRUD and resolution operations for roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Insert a new role and its permission grants in one transaction.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        permission_ids: &[DbId],
    ) -> Result<Role, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO roles (name) VALUES ($1) RETURNING {COLUMNS}");
        let role = sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        for permission_id in permission_ids {
            sqlx::query(
                "INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(role.id)
            .bind(permission_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(role)
    }

    /// Find a role by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY id ASC");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// The permissions granted to a role, ordered by permission ID.
    pub async fn permissions_for(pool: &PgPool, role_id: DbId) -> Result<Vec<Permission>, sqlx::Error> {
        let query = format!(
            "SELECT {PERMISSION_COLUMNS} FROM permissions p
             JOIN role_permissions rp ON rp.permission_id = p.id
             WHERE rp.role_id = $1
             ORDER BY p.id ASC"
        );
        sqlx::query_as::<_, Permission>(&query)
            .bind(role_id)
            .fetch_all(pool)
            .await
    }

    /// Resolve a role with its permissions populated.
    pub async fn find_with_permissions(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RoleWithPermissions>, sqlx::Error> {
        let Some(role) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let permissions = Self::permissions_for(pool, role.id).await?;
        Ok(Some(RoleWithPermissions { role, permissions }))
    }

    /// Resolve a role *name* (the denormalized reference stored on users) to
    /// its permission-name set. Returns `None` when no such role exists.
    pub async fn permission_names_for_role(
        pool: &PgPool,
        role_name: &str,
    ) -> Result<Option<Vec<String>>, sqlx::Error> {
        let Some(role) = Self::find_by_name(pool, role_name).await? else {
            return Ok(None);
        };
        let names = sqlx::query_scalar::<_, String>(
            "SELECT p.name FROM permissions p
             JOIN role_permissions rp ON rp.permission_id = p.id
             WHERE rp.role_id = $1",
        )
        .bind(role.id)
        .fetch_all(pool)
        .await?;
        Ok(Some(names))
    }

    /// Rename a role and/or replace its full grant set in one transaction.
    ///
    /// Returns `None` if no role with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        permission_ids: Option<&[DbId]>,
    ) -> Result<Option<Role>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE roles SET name = COALESCE($2, name), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(role) = sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(ids) = permission_ids {
            sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
                .bind(role.id)
                .execute(&mut *tx)
                .await?;
            for permission_id in ids {
                sqlx::query(
                    "INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2)
                     ON CONFLICT DO NOTHING",
                )
                .bind(role.id)
                .bind(permission_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(role))
    }

    /// Permanently delete a role (grants cascade). Users keep their stored
    /// role name; they simply stop resolving to any permissions.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
