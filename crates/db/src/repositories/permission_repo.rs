//! Repository for the `permissions` table.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::permission::{CreatePermission, Permission, UpdatePermission};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for permissions.
pub struct PermissionRepo;

impl PermissionRepo {
    /// Insert a new permission, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePermission) -> Result<Permission, sqlx::Error> {
        let query = format!(
            "INSERT INTO permissions (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Permission>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a permission by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Permission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM permissions WHERE id = $1");
        sqlx::query_as::<_, Permission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a permission by name (names are unique identifiers).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Permission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM permissions WHERE name = $1");
        sqlx::query_as::<_, Permission>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all permissions ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Permission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM permissions ORDER BY id ASC");
        sqlx::query_as::<_, Permission>(&query).fetch_all(pool).await
    }

    /// Count all permissions. Used by the bootstrap guard and grant checks.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM permissions")
            .fetch_one(pool)
            .await
    }

    /// Count how many of the given ids reference existing permissions.
    /// Callers compare against the input length to reject invalid id lists.
    pub async fn count_existing(pool: &PgPool, ids: &[DbId]) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM permissions WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(pool)
            .await
    }

    /// Update a permission. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePermission,
    ) -> Result<Option<Permission>, sqlx::Error> {
        let query = format!(
            "UPDATE permissions SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Permission>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a permission. Grants referencing it are removed by
    /// the `role_permissions` cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
