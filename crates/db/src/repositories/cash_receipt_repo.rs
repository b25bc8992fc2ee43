//! Repository for the `cash_receipts` table.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::journals::{CashReceipt, CreateCashReceipt, UpdateCashReceipt};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, date, month, year, or_no, location_id, payor_agent_id, address, \
                        cash_account_id, particular, total_debit, total_credit, lines, \
                        is_deleted, deleted_at, restored_at, created_at, updated_at";

/// Provides CRUD operations for cash receipts.
pub struct CashReceiptRepo;

impl CashReceiptRepo {
    /// Insert a new cash receipt, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCashReceipt) -> Result<CashReceipt, sqlx::Error> {
        let query = format!(
            "INSERT INTO cash_receipts
                 (date, month, year, or_no, location_id, payor_agent_id, address,
                  cash_account_id, particular, total_debit, total_credit, lines)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CashReceipt>(&query)
            .bind(input.date)
            .bind(&input.month)
            .bind(&input.year)
            .bind(&input.or_no)
            .bind(input.location_id)
            .bind(input.payor_agent_id)
            .bind(&input.address)
            .bind(input.cash_account_id)
            .bind(&input.particular)
            .bind(&input.total_debit)
            .bind(&input.total_credit)
            .bind(&input.lines)
            .fetch_one(pool)
            .await
    }

    /// Find a cash receipt by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CashReceipt>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM cash_receipts WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, CashReceipt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all cash receipts, newest transaction date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<CashReceipt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cash_receipts WHERE is_deleted = FALSE
             ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, CashReceipt>(&query).fetch_all(pool).await
    }

    /// List soft-deleted cash receipts, most recently deleted first.
    pub async fn list_deleted(pool: &PgPool) -> Result<Vec<CashReceipt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cash_receipts WHERE is_deleted = TRUE
             ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, CashReceipt>(&query).fetch_all(pool).await
    }

    /// Update a cash receipt. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCashReceipt,
    ) -> Result<Option<CashReceipt>, sqlx::Error> {
        let query = format!(
            "UPDATE cash_receipts SET
                date = COALESCE($2, date),
                month = COALESCE($3, month),
                year = COALESCE($4, year),
                or_no = COALESCE($5, or_no),
                location_id = COALESCE($6, location_id),
                payor_agent_id = COALESCE($7, payor_agent_id),
                address = COALESCE($8, address),
                cash_account_id = COALESCE($9, cash_account_id),
                particular = COALESCE($10, particular),
                total_debit = COALESCE($11, total_debit),
                total_credit = COALESCE($12, total_credit),
                lines = COALESCE($13, lines),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CashReceipt>(&query)
            .bind(id)
            .bind(input.date)
            .bind(&input.month)
            .bind(&input.year)
            .bind(&input.or_no)
            .bind(input.location_id)
            .bind(input.payor_agent_id)
            .bind(&input.address)
            .bind(input.cash_account_id)
            .bind(&input.particular)
            .bind(&input.total_debit)
            .bind(&input.total_credit)
            .bind(&input.lines)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a cash receipt. Returns `false` when already deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cash_receipts SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted cash receipt; `deleted_at` is left in place.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cash_receipts SET is_deleted = FALSE, restored_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
