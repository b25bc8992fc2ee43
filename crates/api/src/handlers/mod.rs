//! Request handlers, one module per resource.
//!
//! Every protected handler takes the [`crate::middleware::auth::Principal`]
//! extractor and declares its route policy on the first line. Handlers own
//! the TIN encrypt/decrypt boundary and the audit-log writes that follow
//! journal mutations.

pub mod accounts;
pub mod agents;
pub mod auth;
pub mod branches;
pub mod cash_disbursements;
pub mod cash_receipts;
pub mod company;
pub mod connection;
pub mod general_journals;
pub mod locations;
pub mod permissions;
pub mod purchases_on_account;
pub mod roles;
pub mod sales_on_account;
pub mod transaction_logs;
pub mod users;
