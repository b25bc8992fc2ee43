//! Domain core for the ledgerd back-office API.
//!
//! Pure logic with no I/O: shared identifier types, the error taxonomy,
//! role and permission definitions, the composable authorization policy
//! engine, audit tagged-union types, and the TIN field cipher.

pub mod audit;
pub mod error;
pub mod permissions;
pub mod policy;
pub mod roles;
pub mod tin;
pub mod types;
