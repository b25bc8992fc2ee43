//! Transaction (audit) log entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use ledgerd_core::audit::{AuditAction, JournalKind};
use ledgerd_core::types::{DbId, Timestamp};

use crate::models::user::UserResponse;

/// A transaction log row from the `transaction_logs` table.
///
/// `journal_kind` and `action` are stored as text; they are validated as
/// [`JournalKind`] / [`AuditAction`] before any row is written, so stored
/// values always parse back.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransactionLog {
    pub id: DbId,
    pub journal_kind: String,
    pub journal_id: DbId,
    pub action: String,
    pub remarks: String,
    pub remarks_by: DbId,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A transaction log with its polymorphic journal reference and acting user
/// populated. Either is `null` when the referenced record is soft-deleted.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionLogResponse {
    #[serde(flatten)]
    pub log: TransactionLog,
    pub journal: Option<serde_json::Value>,
    pub acting_user: Option<UserResponse>,
}

/// DTO for inserting a new transaction log entry. The typed kind/action
/// enforce the closed tag sets at the boundary.
#[derive(Debug, Clone)]
pub struct CreateTransactionLog {
    pub journal_kind: JournalKind,
    pub journal_id: DbId,
    pub action: AuditAction,
    pub remarks: String,
    pub remarks_by: DbId,
}
