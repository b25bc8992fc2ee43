//! Company info entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ledgerd_core::tin::TinCipher;
use ledgerd_core::types::{DbId, Timestamp};

/// A company info row from the `company_info` table.
#[derive(Debug, Clone, FromRow)]
pub struct CompanyInfo {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub tin: String,
    pub tin_digest: String,
    pub machine_id: Option<String>,
    pub registration_type: String,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Company info representation for API responses, with the TIN decrypted.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyInfoResponse {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub tin: String,
    pub machine_id: Option<String>,
    pub registration_type: String,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CompanyInfo {
    pub fn into_response(self, cipher: &TinCipher) -> CompanyInfoResponse {
        CompanyInfoResponse {
            id: self.id,
            name: self.name,
            address: self.address,
            tin: cipher.decrypt(&self.tin),
            machine_id: self.machine_id,
            registration_type: self.registration_type,
            is_deleted: self.is_deleted,
            deleted_at: self.deleted_at,
            restored_at: self.restored_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DTO for creating a company info record.
#[derive(Debug)]
pub struct CreateCompanyInfo {
    pub name: String,
    pub address: String,
    pub tin: String,
    pub tin_digest: String,
    pub machine_id: Option<String>,
    pub registration_type: String,
}

/// DTO for updating a company info record.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCompanyInfo {
    pub name: Option<String>,
    pub address: Option<String>,
    pub tin: Option<String>,
    pub tin_digest: Option<String>,
    pub machine_id: Option<String>,
    pub registration_type: Option<String>,
}
