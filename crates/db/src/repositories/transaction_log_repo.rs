//! Repository for the `transaction_logs` table.

use sqlx::PgPool;

use ledgerd_core::audit::JournalKind;
use ledgerd_core::types::DbId;

use crate::models::transaction_log::{CreateTransactionLog, TransactionLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, journal_kind, journal_id, action, remarks, remarks_by, \
                        is_deleted, deleted_at, restored_at, created_at, updated_at";

/// Provides insert and query operations for transaction logs.
///
/// Inserts take the typed [`CreateTransactionLog`] DTO, so only valid
/// kind/action tags ever reach the table. The log write is an independent
/// call -- it is NOT transactionally tied to the journal mutation it records.
pub struct TransactionLogRepo;

impl TransactionLogRepo {
    /// Insert a new log entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTransactionLog,
    ) -> Result<TransactionLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO transaction_logs (journal_kind, journal_id, action, remarks, remarks_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TransactionLog>(&query)
            .bind(input.journal_kind.as_str())
            .bind(input.journal_id)
            .bind(input.action.as_str())
            .bind(&input.remarks)
            .bind(input.remarks_by)
            .fetch_one(pool)
            .await
    }

    /// Find a log entry by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TransactionLog>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM transaction_logs WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, TransactionLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all log entries, newest first. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool) -> Result<Vec<TransactionLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transaction_logs WHERE is_deleted = FALSE
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TransactionLog>(&query).fetch_all(pool).await
    }

    /// List log entries for one journal kind, newest first.
    pub async fn list_by_kind(
        pool: &PgPool,
        kind: JournalKind,
    ) -> Result<Vec<TransactionLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transaction_logs
             WHERE journal_kind = $1 AND is_deleted = FALSE
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TransactionLog>(&query)
            .bind(kind.as_str())
            .fetch_all(pool)
            .await
    }

    /// List log entries for one specific journal record, newest first.
    pub async fn list_by_kind_and_journal(
        pool: &PgPool,
        kind: JournalKind,
        journal_id: DbId,
    ) -> Result<Vec<TransactionLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transaction_logs
             WHERE journal_kind = $1 AND journal_id = $2 AND is_deleted = FALSE
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TransactionLog>(&query)
            .bind(kind.as_str())
            .bind(journal_id)
            .fetch_all(pool)
            .await
    }

    /// List soft-deleted log entries, most recently deleted first.
    pub async fn list_deleted(pool: &PgPool) -> Result<Vec<TransactionLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transaction_logs WHERE is_deleted = TRUE
             ORDER BY deleted_at DESC"
        );
        sqlx::query_as::<_, TransactionLog>(&query).fetch_all(pool).await
    }

    /// Soft-delete a log entry. Returns `false` when already deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE transaction_logs SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted log entry; `deleted_at` is left in place.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE transaction_logs SET is_deleted = FALSE, restored_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND is_deleted = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
