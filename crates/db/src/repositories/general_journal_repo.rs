//! Repository for the `general_journals` table.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::journals::{CreateGeneralJournal, GeneralJournal, UpdateGeneralJournal};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, date, month, year, jv_no, location_id, particular, \
                        total_debit, total_credit, lines, \
                        is_deleted, deleted_at, restored_at, created_at, updated_at";

/// Provides CRUD operations for general journal entries.
pub struct GeneralJournalRepo;

impl GeneralJournalRepo {
    /// Insert a new general journal entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneralJournal,
    ) -> Result<GeneralJournal, sqlx::Error> {
        let query = format!(
            "INSERT INTO general_journals
                 (date, month, year, jv_no, location_id, particular,
                  total_debit, total_credit, lines)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneralJournal>(&query)
            .bind(input.date)
            .bind(&input.month)
            .bind(&input.year)
            .bind(&input.jv_no)
            .bind(input.location_id)
            .bind(&input.particular)
            .bind(&input.total_debit)
            .bind(&input.total_credit)
            .bind(&input.lines)
            .fetch_one(pool)
            .await
    }

    /// Find a general journal entry by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GeneralJournal>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM general_journals WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, GeneralJournal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all general journal entries, newest transaction date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<GeneralJournal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM general_journals WHERE is_deleted = FALSE
             ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, GeneralJournal>(&query).fetch_all(pool).await
    }

    /// List soft-deleted general journal entries, most recently deleted first.
    pub async fn list_deleted(pool: &PgPool) -> Result<Vec<GeneralJournal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM general_journals WHERE is_deleted = TRUE
             ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, GeneralJournal>(&query).fetch_all(pool).await
    }

    /// Update a general journal entry. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGeneralJournal,
    ) -> Result<Option<GeneralJournal>, sqlx::Error> {
        let query = format!(
            "UPDATE general_journals SET
                date = COALESCE($2, date),
                month = COALESCE($3, month),
                year = COALESCE($4, year),
                jv_no = COALESCE($5, jv_no),
                location_id = COALESCE($6, location_id),
                particular = COALESCE($7, particular),
                total_debit = COALESCE($8, total_debit),
                total_credit = COALESCE($9, total_credit),
                lines = COALESCE($10, lines),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneralJournal>(&query)
            .bind(id)
            .bind(input.date)
            .bind(&input.month)
            .bind(&input.year)
            .bind(&input.jv_no)
            .bind(input.location_id)
            .bind(&input.particular)
            .bind(&input.total_debit)
            .bind(&input.total_credit)
            .bind(&input.lines)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a general journal entry. Returns `false` when already deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE general_journals SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted general journal entry; `deleted_at` is left in place.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE general_journals SET is_deleted = FALSE, restored_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
