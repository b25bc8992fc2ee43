//! Permission entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ledgerd_core::types::{DbId, Timestamp};

/// A permission row from the `permissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Permission {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new permission (admin surface; the catalog is normally
/// seeded once at bootstrap).
#[derive(Debug, Deserialize)]
pub struct CreatePermission {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing permission.
#[derive(Debug, Deserialize)]
pub struct UpdatePermission {
    pub name: Option<String>,
    pub description: Option<String>,
}
