//! Repository for the `branches` table.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::branch::{Branch, CreateBranch, UpdateBranch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, tin, tin_digest, machine_id, \
                        is_deleted, deleted_at, restored_at, created_at, updated_at";

/// Provides CRUD operations for branches.
pub struct BranchRepo;

impl BranchRepo {
    /// Insert a new branch, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBranch) -> Result<Branch, sqlx::Error> {
        let query = format!(
            "INSERT INTO branches (name, address, tin, tin_digest, machine_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.tin)
            .bind(&input.tin_digest)
            .bind(&input.machine_id)
            .fetch_one(pool)
            .await
    }

    /// Find a branch by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Branch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM branches WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Branch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live branch by TIN digest, optionally excluding one id (the
    /// row being updated). Used by the uniqueness pre-check.
    pub async fn find_by_tin_digest(
        pool: &PgPool,
        tin_digest: &str,
        exclude_id: Option<DbId>,
    ) -> Result<Option<Branch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM branches
             WHERE tin_digest = $1 AND is_deleted = FALSE AND ($2::BIGINT IS NULL OR id <> $2)"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(tin_digest)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await
    }

    /// List all branches, most recently created first. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool) -> Result<Vec<Branch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM branches WHERE is_deleted = FALSE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Branch>(&query).fetch_all(pool).await
    }

    /// List soft-deleted branches, most recently deleted first.
    pub async fn list_deleted(pool: &PgPool) -> Result<Vec<Branch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM branches WHERE is_deleted = TRUE ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, Branch>(&query).fetch_all(pool).await
    }

    /// Update a branch. Only non-`None` fields are applied; excludes
    /// soft-deleted rows, so a deleted branch reads as not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBranch,
    ) -> Result<Option<Branch>, sqlx::Error> {
        let query = format!(
            "UPDATE branches SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                tin = COALESCE($4, tin),
                tin_digest = COALESCE($5, tin_digest),
                machine_id = COALESCE($6, machine_id),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.tin)
            .bind(&input.tin_digest)
            .bind(&input.machine_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a branch. The filter is the precondition: an
    /// already-deleted row matches nothing and returns `false`.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE branches SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted branch. `deleted_at` is left in place; only
    /// `restored_at` marks the transition back.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE branches SET is_deleted = FALSE, restored_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a branch by ID regardless of deleted state.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Branch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM branches WHERE id = $1");
        sqlx::query_as::<_, Branch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
