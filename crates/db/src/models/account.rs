//! Chart-of-account entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ledgerd_core::types::{DbId, Timestamp};

/// A chart-of-account row from the `chart_of_accounts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChartOfAccount {
    pub id: DbId,
    pub account_code: String,
    pub account_name: String,
    pub account_type: Option<String>,
    pub normal_balance: Option<String>,
    pub parent_account_id: Option<DbId>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateChartOfAccount {
    pub account_code: String,
    pub account_name: String,
    pub account_type: Option<String>,
    pub normal_balance: Option<String>,
    pub parent_account_id: Option<DbId>,
}

/// DTO for updating an account. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateChartOfAccount {
    pub account_code: Option<String>,
    pub account_name: Option<String>,
    pub account_type: Option<String>,
    pub normal_balance: Option<String>,
    pub parent_account_id: Option<DbId>,
}
