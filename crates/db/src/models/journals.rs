//! Entity models and DTOs for the five transaction journals.
//!
//! The journals share a header shape (date, reference number, optional
//! location / agent / account references, particulars, opaque totals, and a
//! JSON blob of debit/credit lines) but are persisted in separate tables and
//! keep their historical reference-number names (CV / OR / invoice / PV / JV).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ledgerd_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Cash disbursement
// ---------------------------------------------------------------------------

/// A cash disbursement row from the `cash_disbursements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CashDisbursement {
    pub id: DbId,
    pub date: NaiveDate,
    pub month: Option<String>,
    pub year: Option<String>,
    pub cv_no: String,
    pub check_no: Option<String>,
    pub location_id: Option<DbId>,
    pub payee_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub cash_account_id: Option<DbId>,
    pub particular: String,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a cash disbursement.
#[derive(Debug, Deserialize)]
pub struct CreateCashDisbursement {
    pub date: NaiveDate,
    pub month: Option<String>,
    pub year: Option<String>,
    pub cv_no: String,
    pub check_no: Option<String>,
    pub location_id: Option<DbId>,
    pub payee_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub cash_account_id: Option<DbId>,
    pub particular: String,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
}

/// DTO for updating a cash disbursement. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCashDisbursement {
    pub date: Option<NaiveDate>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub cv_no: Option<String>,
    pub check_no: Option<String>,
    pub location_id: Option<DbId>,
    pub payee_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub cash_account_id: Option<DbId>,
    pub particular: Option<String>,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Cash receipts
// ---------------------------------------------------------------------------

/// A cash receipts row from the `cash_receipts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CashReceipt {
    pub id: DbId,
    pub date: NaiveDate,
    pub month: Option<String>,
    pub year: Option<String>,
    pub or_no: String,
    pub location_id: Option<DbId>,
    pub payor_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub cash_account_id: Option<DbId>,
    pub particular: String,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a cash receipt.
#[derive(Debug, Deserialize)]
pub struct CreateCashReceipt {
    pub date: NaiveDate,
    pub month: Option<String>,
    pub year: Option<String>,
    pub or_no: String,
    pub location_id: Option<DbId>,
    pub payor_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub cash_account_id: Option<DbId>,
    pub particular: String,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
}

/// DTO for updating a cash receipt.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCashReceipt {
    pub date: Option<NaiveDate>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub or_no: Option<String>,
    pub location_id: Option<DbId>,
    pub payor_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub cash_account_id: Option<DbId>,
    pub particular: Option<String>,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Sales on account
// ---------------------------------------------------------------------------

/// A sales-on-account row from the `sales_on_account` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SaleOnAccount {
    pub id: DbId,
    pub date: NaiveDate,
    pub month: Option<String>,
    pub year: Option<String>,
    pub invoice_no: String,
    pub location_id: Option<DbId>,
    pub customer_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub particular: String,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a sale on account.
#[derive(Debug, Deserialize)]
pub struct CreateSaleOnAccount {
    pub date: NaiveDate,
    pub month: Option<String>,
    pub year: Option<String>,
    pub invoice_no: String,
    pub location_id: Option<DbId>,
    pub customer_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub particular: String,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
}

/// DTO for updating a sale on account.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSaleOnAccount {
    pub date: Option<NaiveDate>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub invoice_no: Option<String>,
    pub location_id: Option<DbId>,
    pub customer_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub particular: Option<String>,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Purchase on account
// ---------------------------------------------------------------------------

/// A purchase-on-account row from the `purchases_on_account` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PurchaseOnAccount {
    pub id: DbId,
    pub date: NaiveDate,
    pub month: Option<String>,
    pub year: Option<String>,
    pub pv_no: String,
    pub location_id: Option<DbId>,
    pub supplier_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub particular: String,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a purchase on account.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOnAccount {
    pub date: NaiveDate,
    pub month: Option<String>,
    pub year: Option<String>,
    pub pv_no: String,
    pub location_id: Option<DbId>,
    pub supplier_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub particular: String,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
}

/// DTO for updating a purchase on account.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePurchaseOnAccount {
    pub date: Option<NaiveDate>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub pv_no: Option<String>,
    pub location_id: Option<DbId>,
    pub supplier_agent_id: Option<DbId>,
    pub address: Option<String>,
    pub particular: Option<String>,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// General journal
// ---------------------------------------------------------------------------

/// A general journal row from the `general_journals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeneralJournal {
    pub id: DbId,
    pub date: NaiveDate,
    pub month: Option<String>,
    pub year: Option<String>,
    pub jv_no: String,
    pub location_id: Option<DbId>,
    pub particular: String,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a general journal entry.
#[derive(Debug, Deserialize)]
pub struct CreateGeneralJournal {
    pub date: NaiveDate,
    pub month: Option<String>,
    pub year: Option<String>,
    pub jv_no: String,
    pub location_id: Option<DbId>,
    pub particular: String,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
}

/// DTO for updating a general journal entry.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGeneralJournal {
    pub date: Option<NaiveDate>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub jv_no: Option<String>,
    pub location_id: Option<DbId>,
    pub particular: Option<String>,
    pub total_debit: Option<String>,
    pub total_credit: Option<String>,
    pub lines: Option<serde_json::Value>,
}
