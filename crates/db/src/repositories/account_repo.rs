//! Repository for the `chart_of_accounts` table.

use sqlx::PgPool;

use ledgerd_core::types::DbId;

use crate::models::account::{ChartOfAccount, CreateChartOfAccount, UpdateChartOfAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_code, account_name, account_type, normal_balance, \
                        parent_account_id, is_deleted, deleted_at, restored_at, \
                        created_at, updated_at";

/// Provides CRUD operations for chart-of-account entries.
pub struct ChartOfAccountRepo;

impl ChartOfAccountRepo {
    /// Insert a new account, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateChartOfAccount,
    ) -> Result<ChartOfAccount, sqlx::Error> {
        let query = format!(
            "INSERT INTO chart_of_accounts
                 (account_code, account_name, account_type, normal_balance, parent_account_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChartOfAccount>(&query)
            .bind(&input.account_code)
            .bind(&input.account_name)
            .bind(&input.account_type)
            .bind(&input.normal_balance)
            .bind(input.parent_account_id)
            .fetch_one(pool)
            .await
    }

    /// Find an account by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ChartOfAccount>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM chart_of_accounts WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, ChartOfAccount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live account by code, optionally excluding one id (the row
    /// being updated). Used by the uniqueness pre-check.
    pub async fn find_by_account_code(
        pool: &PgPool,
        account_code: &str,
        exclude_id: Option<DbId>,
    ) -> Result<Option<ChartOfAccount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chart_of_accounts
             WHERE account_code = $1 AND is_deleted = FALSE AND ($2::BIGINT IS NULL OR id <> $2)"
        );
        sqlx::query_as::<_, ChartOfAccount>(&query)
            .bind(account_code)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await
    }

    /// List all accounts ordered by account code. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool) -> Result<Vec<ChartOfAccount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chart_of_accounts WHERE is_deleted = FALSE
             ORDER BY account_code ASC"
        );
        sqlx::query_as::<_, ChartOfAccount>(&query).fetch_all(pool).await
    }

    /// List soft-deleted accounts, most recently deleted first.
    pub async fn list_deleted(pool: &PgPool) -> Result<Vec<ChartOfAccount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chart_of_accounts WHERE is_deleted = TRUE
             ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, ChartOfAccount>(&query).fetch_all(pool).await
    }

    /// Update an account. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateChartOfAccount,
    ) -> Result<Option<ChartOfAccount>, sqlx::Error> {
        let query = format!(
            "UPDATE chart_of_accounts SET
                account_code = COALESCE($2, account_code),
                account_name = COALESCE($3, account_name),
                account_type = COALESCE($4, account_type),
                normal_balance = COALESCE($5, normal_balance),
                parent_account_id = COALESCE($6, parent_account_id),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChartOfAccount>(&query)
            .bind(id)
            .bind(&input.account_code)
            .bind(&input.account_name)
            .bind(&input.account_type)
            .bind(&input.normal_balance)
            .bind(input.parent_account_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an account. Sub-accounts are not cascaded; reads null out
    /// a deleted parent instead.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE chart_of_accounts SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted account; `deleted_at` is left in place.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE chart_of_accounts SET is_deleted = FALSE, restored_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Irreversibly remove EVERY account, deleted or not. This bypasses the
    /// soft-delete state machine entirely; the route gating it is sysadmin
    /// only. Returns the number of rows removed.
    pub async fn delete_all_permanently(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chart_of_accounts")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
