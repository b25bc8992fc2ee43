//! User (credential) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ledgerd_core::types::{DbId, Timestamp};

/// Account status values. Accounts start `inactive`, flip to `active` on a
/// successful sign-in, and become `blocked` after repeated failed password
/// checks. Blocked accounts cannot authenticate until explicitly unblocked.
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";
pub const STATUS_BLOCKED: &str = "blocked";

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: Option<String>,
    pub email: String,
    pub password_hash: String,
    /// Role *name* (e.g. `"sysadmin"`), deliberately not a foreign key.
    pub role: String,
    pub status: String,
    pub failed_login_attempts: i32,
    pub blocked_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: Option<String>,
    pub email: String,
    pub role: String,
    pub status: String,
    pub blocked_at: Option<Timestamp>,
    pub restored_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            middle_initial: user.middle_initial,
            email: user.email,
            role: user.role,
            status: user.status,
            blocked_at: user.blocked_at,
            restored_at: user.restored_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. New accounts always start `inactive`.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_initial: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}
