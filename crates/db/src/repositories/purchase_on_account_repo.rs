//! Repository for the `purchases_on_account` table.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::journals::{CreatePurchaseOnAccount, PurchaseOnAccount, UpdatePurchaseOnAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, date, month, year, pv_no, location_id, supplier_agent_id, \
                        address, particular, total_debit, total_credit, lines, \
                        is_deleted, deleted_at, restored_at, created_at, updated_at";

/// Provides CRUD operations for purchases on account.
pub struct PurchaseOnAccountRepo;

impl PurchaseOnAccountRepo {
    /// Insert a new purchase on account, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePurchaseOnAccount,
    ) -> Result<PurchaseOnAccount, sqlx::Error> {
        let query = format!(
            "INSERT INTO purchases_on_account
                 (date, month, year, pv_no, location_id, supplier_agent_id, address,
                  particular, total_debit, total_credit, lines)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PurchaseOnAccount>(&query)
            .bind(input.date)
            .bind(&input.month)
            .bind(&input.year)
            .bind(&input.pv_no)
            .bind(input.location_id)
            .bind(input.supplier_agent_id)
            .bind(&input.address)
            .bind(&input.particular)
            .bind(&input.total_debit)
            .bind(&input.total_credit)
            .bind(&input.lines)
            .fetch_one(pool)
            .await
    }

    /// Find a purchase on account by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PurchaseOnAccount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases_on_account WHERE id = $1 AND is_deleted = FALSE"
        );
        sqlx::query_as::<_, PurchaseOnAccount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all purchases on account, newest transaction date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PurchaseOnAccount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases_on_account WHERE is_deleted = FALSE
             ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, PurchaseOnAccount>(&query).fetch_all(pool).await
    }

    /// List soft-deleted purchases on account, most recently deleted first.
    pub async fn list_deleted(pool: &PgPool) -> Result<Vec<PurchaseOnAccount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases_on_account WHERE is_deleted = TRUE
             ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, PurchaseOnAccount>(&query).fetch_all(pool).await
    }

    /// Update a purchase on account. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePurchaseOnAccount,
    ) -> Result<Option<PurchaseOnAccount>, sqlx::Error> {
        let query = format!(
            "UPDATE purchases_on_account SET
                date = COALESCE($2, date),
                month = COALESCE($3, month),
                year = COALESCE($4, year),
                pv_no = COALESCE($5, pv_no),
                location_id = COALESCE($6, location_id),
                supplier_agent_id = COALESCE($7, supplier_agent_id),
                address = COALESCE($8, address),
                particular = COALESCE($9, particular),
                total_debit = COALESCE($10, total_debit),
                total_credit = COALESCE($11, total_credit),
                lines = COALESCE($12, lines),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PurchaseOnAccount>(&query)
            .bind(id)
            .bind(input.date)
            .bind(&input.month)
            .bind(&input.year)
            .bind(&input.pv_no)
            .bind(input.location_id)
            .bind(input.supplier_agent_id)
            .bind(&input.address)
            .bind(&input.particular)
            .bind(&input.total_debit)
            .bind(&input.total_credit)
            .bind(&input.lines)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a purchase on account. Returns `false` when already deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE purchases_on_account SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted purchase on account; `deleted_at` is left in place.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE purchases_on_account SET is_deleted = FALSE, restored_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
