//! Tagged-union types for the audit log's polymorphic journal reference.
//!
//! A transaction log row stores a `journal_kind` tag next to an untyped
//! `journal_id`; the tag decides which journal table the id is resolved
//! against. The tag set is closed -- anything else is a validation error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The five journal kinds a transaction log entry can reference.
///
/// Serialized with the historical collection names so stored tags and API
/// payloads stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JournalKind {
    #[serde(rename = "CashDisbursementTransaction")]
    CashDisbursement,
    #[serde(rename = "CashReceiptsTransaction")]
    CashReceipts,
    #[serde(rename = "SalesOnAccount")]
    SalesOnAccount,
    #[serde(rename = "PurchaseOnAccountTransaction")]
    PurchaseOnAccount,
    #[serde(rename = "GeneralJournal")]
    GeneralJournal,
}

/// All journal kinds, in tag order.
pub const ALL_JOURNAL_KINDS: &[JournalKind] = &[
    JournalKind::CashDisbursement,
    JournalKind::CashReceipts,
    JournalKind::SalesOnAccount,
    JournalKind::PurchaseOnAccount,
    JournalKind::GeneralJournal,
];

impl JournalKind {
    /// The stored tag string.
    pub fn as_str(self) -> &'static str {
        match self {
            JournalKind::CashDisbursement => "CashDisbursementTransaction",
            JournalKind::CashReceipts => "CashReceiptsTransaction",
            JournalKind::SalesOnAccount => "SalesOnAccount",
            JournalKind::PurchaseOnAccount => "PurchaseOnAccountTransaction",
            JournalKind::GeneralJournal => "GeneralJournal",
        }
    }
}

impl FromStr for JournalKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_JOURNAL_KINDS
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid transaction type: {s}")))
    }
}

impl fmt::Display for JournalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The action recorded by a transaction log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Restore,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::Restore => "RESTORE",
        }
    }
}

impl FromStr for AuditAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(AuditAction::Create),
            "UPDATE" => Ok(AuditAction::Update),
            "DELETE" => Ok(AuditAction::Delete),
            "RESTORE" => Ok(AuditAction::Restore),
            other => Err(CoreError::Validation(format!("Invalid audit action: {other}"))),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
