//! Business-partner (agent) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ledgerd_core::tin::TinCipher;
use ledgerd_core::types::{DbId, Timestamp};

/// An agent row from the `agents` table. `tin` holds ciphertext.
#[derive(Debug, Clone, FromRow)]
pub struct Agent {
    pub id: DbId,
    pub agent_code: String,
    pub tin: String,
    pub tin_digest: String,
    pub tax_classification: String,
    pub registered_name: String,
    pub agent_name: String,
    pub trade_name: String,
    pub agent_type: String,
    pub registration_type: String,
    pub authorized_representative: Option<String>,
    pub address: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub website: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Agent representation for API responses, with the TIN decrypted.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    pub id: DbId,
    pub agent_code: String,
    pub tin: String,
    pub tax_classification: String,
    pub registered_name: String,
    pub agent_name: String,
    pub trade_name: String,
    pub agent_type: String,
    pub registration_type: String,
    pub authorized_representative: Option<String>,
    pub address: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub website: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Agent {
    pub fn into_response(self, cipher: &TinCipher) -> AgentResponse {
        AgentResponse {
            id: self.id,
            agent_code: self.agent_code,
            tin: cipher.decrypt(&self.tin),
            tax_classification: self.tax_classification,
            registered_name: self.registered_name,
            agent_name: self.agent_name,
            trade_name: self.trade_name,
            agent_type: self.agent_type,
            registration_type: self.registration_type,
            authorized_representative: self.authorized_representative,
            address: self.address,
            email: self.email,
            phone: self.phone,
            fax: self.fax,
            website: self.website,
            is_deleted: self.is_deleted,
            deleted_at: self.deleted_at,
            restored_at: self.restored_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DTO for creating an agent. `tin` is ciphertext, `tin_digest` the keyed
/// lookup digest.
#[derive(Debug)]
pub struct CreateAgent {
    pub agent_code: String,
    pub tin: String,
    pub tin_digest: String,
    pub tax_classification: String,
    pub registered_name: String,
    pub agent_name: String,
    pub trade_name: String,
    pub agent_type: String,
    pub registration_type: String,
    pub authorized_representative: Option<String>,
    pub address: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub website: Option<String>,
}

/// DTO for updating an agent. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAgent {
    pub agent_code: Option<String>,
    pub tin: Option<String>,
    pub tin_digest: Option<String>,
    pub tax_classification: Option<String>,
    pub registered_name: Option<String>,
    pub agent_name: Option<String>,
    pub trade_name: Option<String>,
    pub agent_type: Option<String>,
    pub registration_type: Option<String>,
    pub authorized_representative: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub website: Option<String>,
}
