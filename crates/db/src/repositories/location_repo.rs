//! Repository for the `locations` table.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::location::{CreateLocation, Location, UpdateLocation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, tin, tin_digest, machine_id, branch_id, \
                        is_deleted, deleted_at, restored_at, created_at, updated_at";

/// Provides CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (name, address, tin, tin_digest, machine_id, branch_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.tin)
            .bind(&input.tin_digest)
            .bind(&input.machine_id)
            .bind(input.branch_id)
            .fetch_one(pool)
            .await
    }

    /// Find a location by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live location by TIN digest, optionally excluding one id.
    pub async fn find_by_tin_digest(
        pool: &PgPool,
        tin_digest: &str,
        exclude_id: Option<DbId>,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations
             WHERE tin_digest = $1 AND is_deleted = FALSE AND ($2::BIGINT IS NULL OR id <> $2)"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(tin_digest)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await
    }

    /// List all locations, most recently created first. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations WHERE is_deleted = FALSE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }

    /// List soft-deleted locations, most recently deleted first.
    pub async fn list_deleted(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locations WHERE is_deleted = TRUE ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }

    /// Update a location. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                tin = COALESCE($4, tin),
                tin_digest = COALESCE($5, tin_digest),
                machine_id = COALESCE($6, machine_id),
                branch_id = COALESCE($7, branch_id),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.tin)
            .bind(&input.tin_digest)
            .bind(&input.machine_id)
            .bind(input.branch_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a location. Returns `false` when already deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE locations SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted location; `deleted_at` is left in place.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE locations SET is_deleted = FALSE, restored_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
