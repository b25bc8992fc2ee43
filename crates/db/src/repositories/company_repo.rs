//! Repository for the `company_info` table.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::company::{CompanyInfo, CreateCompanyInfo, UpdateCompanyInfo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, tin, tin_digest, machine_id, registration_type, \
                        is_deleted, deleted_at, restored_at, created_at, updated_at";

/// Provides CRUD operations for company info records.
pub struct CompanyInfoRepo;

impl CompanyInfoRepo {
    /// Insert a new company info record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCompanyInfo) -> Result<CompanyInfo, sqlx::Error> {
        let query = format!(
            "INSERT INTO company_info (name, address, tin, tin_digest, machine_id, registration_type)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompanyInfo>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.tin)
            .bind(&input.tin_digest)
            .bind(&input.machine_id)
            .bind(&input.registration_type)
            .fetch_one(pool)
            .await
    }

    /// Find a company info record by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CompanyInfo>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM company_info WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, CompanyInfo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live company record by TIN digest, optionally excluding one id.
    pub async fn find_by_tin_digest(
        pool: &PgPool,
        tin_digest: &str,
        exclude_id: Option<DbId>,
    ) -> Result<Option<CompanyInfo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM company_info
             WHERE tin_digest = $1 AND is_deleted = FALSE AND ($2::BIGINT IS NULL OR id <> $2)"
        );
        sqlx::query_as::<_, CompanyInfo>(&query)
            .bind(tin_digest)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await
    }

    /// List all company info records. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool) -> Result<Vec<CompanyInfo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM company_info WHERE is_deleted = FALSE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CompanyInfo>(&query).fetch_all(pool).await
    }

    /// List soft-deleted company info records.
    pub async fn list_deleted(pool: &PgPool) -> Result<Vec<CompanyInfo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM company_info WHERE is_deleted = TRUE ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, CompanyInfo>(&query).fetch_all(pool).await
    }

    /// Update a company info record. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCompanyInfo,
    ) -> Result<Option<CompanyInfo>, sqlx::Error> {
        let query = format!(
            "UPDATE company_info SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                tin = COALESCE($4, tin),
                tin_digest = COALESCE($5, tin_digest),
                machine_id = COALESCE($6, machine_id),
                registration_type = COALESCE($7, registration_type),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompanyInfo>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.tin)
            .bind(&input.tin_digest)
            .bind(&input.machine_id)
            .bind(&input.registration_type)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a company info record. Returns `false` when already deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE company_info SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted company info record.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE company_info SET is_deleted = FALSE, restored_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
