//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Soft-deletable entities share a
//! uniform convention: normal reads and updates filter `is_deleted = FALSE`,
//! `soft_delete` / `restore` are precondition-filtered single updates, and
//! `list_deleted` exposes the trash view.

pub mod account_repo;
pub mod agent_repo;
pub mod branch_repo;
pub mod cash_disbursement_repo;
pub mod cash_receipt_repo;
pub mod company_repo;
pub mod general_journal_repo;
pub mod location_repo;
pub mod permission_repo;
pub mod purchase_on_account_repo;
pub mod role_repo;
pub mod sale_on_account_repo;
pub mod transaction_log_repo;
pub mod user_repo;

pub use account_repo::ChartOfAccountRepo;
pub use agent_repo::AgentRepo;
pub use branch_repo::BranchRepo;
pub use cash_disbursement_repo::CashDisbursementRepo;
pub use cash_receipt_repo::CashReceiptRepo;
pub use company_repo::CompanyInfoRepo;
pub use general_journal_repo::GeneralJournalRepo;
pub use location_repo::LocationRepo;
pub use permission_repo::PermissionRepo;
pub use purchase_on_account_repo::PurchaseOnAccountRepo;
pub use role_repo::RoleRepo;
pub use sale_on_account_repo::SaleOnAccountRepo;
pub use transaction_log_repo::TransactionLogRepo;
pub use user_repo::UserRepo;
