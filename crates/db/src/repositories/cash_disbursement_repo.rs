//! Repository for the `cash_disbursements` table.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::journals::{CashDisbursement, CreateCashDisbursement, UpdateCashDisbursement};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, date, month, year, cv_no, check_no, location_id, payee_agent_id, \
                        address, cash_account_id, particular, total_debit, total_credit, lines, \
                        is_deleted, deleted_at, restored_at, created_at, updated_at";

/// Provides CRUD operations for cash disbursements.
pub struct CashDisbursementRepo;

impl CashDisbursementRepo {
    /// Insert a new cash disbursement, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCashDisbursement,
    ) -> Result<CashDisbursement, sqlx::Error> {
        let query = format!(
            "INSERT INTO cash_disbursements
                 (date, month, year, cv_no, check_no, location_id, payee_agent_id, address,
                  cash_account_id, particular, total_debit, total_credit, lines)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CashDisbursement>(&query)
            .bind(input.date)
            .bind(&input.month)
            .bind(&input.year)
            .bind(&input.cv_no)
            .bind(&input.check_no)
            .bind(input.location_id)
            .bind(input.payee_agent_id)
            .bind(&input.address)
            .bind(input.cash_account_id)
            .bind(&input.particular)
            .bind(&input.total_debit)
            .bind(&input.total_credit)
            .bind(&input.lines)
            .fetch_one(pool)
            .await
    }

    /// Find a cash disbursement by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CashDisbursement>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM cash_disbursements WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, CashDisbursement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all cash disbursements, newest transaction date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<CashDisbursement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cash_disbursements WHERE is_deleted = FALSE
             ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, CashDisbursement>(&query).fetch_all(pool).await
    }

    /// List soft-deleted cash disbursements, most recently deleted first.
    pub async fn list_deleted(pool: &PgPool) -> Result<Vec<CashDisbursement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cash_disbursements WHERE is_deleted = TRUE
             ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, CashDisbursement>(&query).fetch_all(pool).await
    }

    /// Update a cash disbursement. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCashDisbursement,
    ) -> Result<Option<CashDisbursement>, sqlx::Error> {
        let query = format!(
            "UPDATE cash_disbursements SET
                date = COALESCE($2, date),
                month = COALESCE($3, month),
                year = COALESCE($4, year),
                cv_no = COALESCE($5, cv_no),
                check_no = COALESCE($6, check_no),
                location_id = COALESCE($7, location_id),
                payee_agent_id = COALESCE($8, payee_agent_id),
                address = COALESCE($9, address),
                cash_account_id = COALESCE($10, cash_account_id),
                particular = COALESCE($11, particular),
                total_debit = COALESCE($12, total_debit),
                total_credit = COALESCE($13, total_credit),
                lines = COALESCE($14, lines),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CashDisbursement>(&query)
            .bind(id)
            .bind(input.date)
            .bind(&input.month)
            .bind(&input.year)
            .bind(&input.cv_no)
            .bind(&input.check_no)
            .bind(input.location_id)
            .bind(input.payee_agent_id)
            .bind(&input.address)
            .bind(input.cash_account_id)
            .bind(&input.particular)
            .bind(&input.total_debit)
            .bind(&input.total_credit)
            .bind(&input.lines)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a cash disbursement. Returns `false` when already deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cash_disbursements SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted cash disbursement; `deleted_at` is left in place.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cash_disbursements SET is_deleted = FALSE, restored_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
