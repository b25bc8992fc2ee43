//! Branch entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ledgerd_core::tin::TinCipher;
use ledgerd_core::types::{DbId, Timestamp};

/// A branch row from the `branches` table. `tin` holds ciphertext; use
/// [`Branch::into_response`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Branch {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub tin: String,
    pub tin_digest: String,
    pub machine_id: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Branch representation for API responses, with the TIN decrypted.
#[derive(Debug, Clone, Serialize)]
pub struct BranchResponse {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub tin: String,
    pub machine_id: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Branch {
    pub fn into_response(self, cipher: &TinCipher) -> BranchResponse {
        BranchResponse {
            id: self.id,
            name: self.name,
            address: self.address,
            tin: cipher.decrypt(&self.tin),
            machine_id: self.machine_id,
            is_deleted: self.is_deleted,
            deleted_at: self.deleted_at,
            restored_at: self.restored_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DTO for creating a branch. `tin` is ciphertext, `tin_digest` the keyed
/// lookup digest -- both produced by the caller's cipher.
#[derive(Debug)]
pub struct CreateBranch {
    pub name: String,
    pub address: String,
    pub tin: String,
    pub tin_digest: String,
    pub machine_id: Option<String>,
}

/// DTO for updating a branch. `tin`/`tin_digest` travel together.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBranch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub tin: Option<String>,
    pub tin_digest: Option<String>,
    pub machine_id: Option<String>,
}
