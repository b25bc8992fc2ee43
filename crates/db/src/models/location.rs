//! Location entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ledgerd_core::tin::TinCipher;
use ledgerd_core::types::{DbId, Timestamp};

use crate::models::branch::BranchResponse;

/// A location row from the `locations` table.
#[derive(Debug, Clone, FromRow)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub tin: String,
    pub tin_digest: String,
    pub machine_id: Option<String>,
    pub branch_id: Option<DbId>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Location representation for API responses. `branch` is the populated
/// parent branch, or `null` when the branch is absent or soft-deleted.
#[derive(Debug, Clone, Serialize)]
pub struct LocationResponse {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub tin: String,
    pub machine_id: Option<String>,
    pub branch: Option<BranchResponse>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Location {
    pub fn into_response(
        self,
        cipher: &TinCipher,
        branch: Option<BranchResponse>,
    ) -> LocationResponse {
        LocationResponse {
            id: self.id,
            name: self.name,
            address: self.address,
            tin: cipher.decrypt(&self.tin),
            machine_id: self.machine_id,
            branch,
            is_deleted: self.is_deleted,
            deleted_at: self.deleted_at,
            restored_at: self.restored_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DTO for creating a location.
#[derive(Debug)]
pub struct CreateLocation {
    pub name: String,
    pub address: String,
    pub tin: String,
    pub tin_digest: String,
    pub machine_id: Option<String>,
    pub branch_id: Option<DbId>,
}

/// DTO for updating a location.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub address: Option<String>,
    pub tin: Option<String>,
    pub tin_digest: Option<String>,
    pub machine_id: Option<String>,
    pub branch_id: Option<DbId>,
}
