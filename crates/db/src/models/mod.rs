//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches
//! - Where a row carries an encrypted TIN, a `*Response` struct with the
//!   decrypted value for external-facing output

pub mod account;
pub mod agent;
pub mod branch;
pub mod company;
pub mod journals;
pub mod location;
pub mod permission;
pub mod role;
pub mod transaction_log;
pub mod user;
