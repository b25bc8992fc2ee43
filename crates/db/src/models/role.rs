//! Role entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ledgerd_core::types::{DbId, Timestamp};

use crate::models::permission::Permission;

/// A role row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A role with its permission grants resolved through `role_permissions`.
#[derive(Debug, Clone, Serialize)]
pub struct RoleWithPermissions {
    #[serde(flatten)]
    pub role: Role,
    pub permissions: Vec<Permission>,
}

/// DTO for creating a role. Every id in `permission_ids` must reference an
/// existing permission; callers validate before insert.
#[derive(Debug, Deserialize)]
pub struct CreateRole {
    pub name: String,
    #[serde(default)]
    pub permission_ids: Vec<DbId>,
}

/// DTO for updating a role. `permission_ids`, when present, replaces the
/// full grant set.
#[derive(Debug, Deserialize)]
pub struct UpdateRole {
    pub name: Option<String>,
    pub permission_ids: Option<Vec<DbId>>,
}
