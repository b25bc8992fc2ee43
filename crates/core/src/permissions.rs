//! The fixed permission catalog.
//!
//! Capability names follow the `{verb}{Entity}` convention and are immutable
//! identifiers: routes reference them through the [`names`] constants and the
//! bootstrap step seeds [`CATALOG`] verbatim when the permissions table is
//! empty. The catalog is open -- an entity gains the standard view / create /
//! update / delete / restore capabilities by adding rows here.

/// One seedable catalog row.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
}

/// Capability name constants, grouped by entity.
pub mod names {
    // Users
    pub const VIEW_ALL_USERS: &str = "viewAllUsers";
    pub const CREATE_USER: &str = "createUser";
    pub const VIEW_USER_BY_ID: &str = "viewUserById";
    pub const UPDATE_USER: &str = "updateUser";
    pub const UNBLOCK_USER: &str = "unblockUser";

    // Roles
    pub const VIEW_ALL_ROLES: &str = "viewAllRoles";
    pub const CREATE_ROLE: &str = "createRole";
    pub const VIEW_ROLE_BY_ID: &str = "viewRoleById";
    pub const UPDATE_ROLE: &str = "updateRole";
    pub const DELETE_ROLE: &str = "deleteRole";

    // Permissions
    pub const VIEW_ALL_PERMISSIONS: &str = "viewAllPermissions";
    pub const CREATE_PERMISSION: &str = "createPermission";
    pub const VIEW_PERMISSION_BY_ID: &str = "viewPermissionById";
    pub const UPDATE_PERMISSION: &str = "updatePermission";
    pub const DELETE_PERMISSION: &str = "deletePermission";

    // Agents
    pub const VIEW_ALL_AGENTS: &str = "viewAllAgents";
    pub const CREATE_AGENT: &str = "createAgent";
    pub const VIEW_AGENT_BY_ID: &str = "viewAgentById";
    pub const UPDATE_AGENT: &str = "updateAgent";
    pub const DELETE_AGENT: &str = "deleteAgent";
    pub const RESTORE_AGENT: &str = "restoreAgent";

    // Branches
    pub const VIEW_ALL_BRANCHES: &str = "viewAllBranches";
    pub const CREATE_BRANCH: &str = "createBranch";
    pub const VIEW_BRANCH_BY_ID: &str = "viewBranchById";
    pub const UPDATE_BRANCH: &str = "updateBranch";
    pub const DELETE_BRANCH: &str = "deleteBranch";
    pub const RESTORE_BRANCH: &str = "restoreBranch";

    // Locations
    pub const VIEW_ALL_LOCATIONS: &str = "viewAllLocations";
    pub const CREATE_LOCATION: &str = "createLocation";
    pub const VIEW_LOCATION_BY_ID: &str = "viewLocationById";
    pub const UPDATE_LOCATION: &str = "updateLocation";
    pub const DELETE_LOCATION: &str = "deleteLocation";
    pub const RESTORE_LOCATION: &str = "restoreLocation";

    // Company info
    pub const VIEW_ALL_COMPANY_INFO: &str = "viewAllCompanyInfo";
    pub const CREATE_COMPANY_INFO: &str = "createCompanyInfo";
    pub const VIEW_COMPANY_INFO_BY_ID: &str = "viewCompanyInfoById";
    pub const UPDATE_COMPANY_INFO: &str = "updateCompanyInfo";
    pub const DELETE_COMPANY_INFO: &str = "deleteCompanyInfo";
    pub const RESTORE_COMPANY_INFO: &str = "restoreCompanyInfo";

    // Chart of accounts
    pub const VIEW_ALL_ACCOUNTS: &str = "viewAllAccounts";
    pub const CREATE_ACCOUNT: &str = "createAccount";
    pub const VIEW_ACCOUNT_BY_ID: &str = "viewAccountById";
    pub const UPDATE_ACCOUNT: &str = "updateAccount";
    pub const DELETE_ACCOUNT: &str = "deleteAccount";
    pub const RESTORE_ACCOUNT: &str = "restoreAccount";
    pub const DELETE_ALL_ACCOUNTS_PERMANENTLY: &str = "deleteAllAccountsPermanently";

    // Transaction journals (shared by all five journal kinds)
    pub const VIEW_ALL_TRANSACTIONS: &str = "viewAllTransactions";
    pub const VIEW_TRANSACTION_BY_ID: &str = "viewTransactionById";
    pub const CREATE_TRANSACTION: &str = "createTransaction";
    pub const UPDATE_TRANSACTION: &str = "updateTransaction";
    pub const DELETE_TRANSACTION: &str = "deleteTransaction";
    pub const RESTORE_TRANSACTION: &str = "restoreTransaction";

    // Transaction logs
    pub const VIEW_ALL_TRANSACTION_LOGS: &str = "viewAllTransactionLogs";
    pub const VIEW_TRANSACTION_LOG_BY_ID: &str = "viewTransactionLogById";
    pub const CREATE_TRANSACTION_LOG: &str = "createTransactionLog";
    pub const DELETE_TRANSACTION_LOG: &str = "deleteTransactionLog";
    pub const RESTORE_TRANSACTION_LOG: &str = "restoreTransactionLog";
}

use names::*;

/// The full seedable catalog. Bootstrap inserts these rows once, when the
/// permissions table is empty; later additions do not back-fill existing
/// role grants.
pub const CATALOG: &[CatalogEntry] = &[
    // Users
    CatalogEntry { name: VIEW_ALL_USERS, description: "View all users" },
    CatalogEntry { name: CREATE_USER, description: "Create user" },
    CatalogEntry { name: VIEW_USER_BY_ID, description: "View user by id" },
    CatalogEntry { name: UPDATE_USER, description: "Update user" },
    CatalogEntry { name: UNBLOCK_USER, description: "Unblock user" },
    // Roles
    CatalogEntry { name: VIEW_ALL_ROLES, description: "View all roles" },
    CatalogEntry { name: CREATE_ROLE, description: "Create role" },
    CatalogEntry { name: VIEW_ROLE_BY_ID, description: "View role by id" },
    CatalogEntry { name: UPDATE_ROLE, description: "Update role" },
    CatalogEntry { name: DELETE_ROLE, description: "Delete role" },
    // Permissions
    CatalogEntry { name: VIEW_ALL_PERMISSIONS, description: "View all permissions" },
    CatalogEntry { name: CREATE_PERMISSION, description: "Create permission" },
    CatalogEntry { name: VIEW_PERMISSION_BY_ID, description: "View permission by id" },
    CatalogEntry { name: UPDATE_PERMISSION, description: "Update permission" },
    CatalogEntry { name: DELETE_PERMISSION, description: "Delete permission" },
    // Agents
    CatalogEntry { name: VIEW_ALL_AGENTS, description: "View all agents" },
    CatalogEntry { name: CREATE_AGENT, description: "Create agent" },
    CatalogEntry { name: VIEW_AGENT_BY_ID, description: "View agent by id" },
    CatalogEntry { name: UPDATE_AGENT, description: "Update agent" },
    CatalogEntry { name: DELETE_AGENT, description: "Delete agent" },
    CatalogEntry { name: RESTORE_AGENT, description: "Restore agent" },
    // Branches
    CatalogEntry { name: VIEW_ALL_BRANCHES, description: "View all branches" },
    CatalogEntry { name: CREATE_BRANCH, description: "Create branch" },
    CatalogEntry { name: VIEW_BRANCH_BY_ID, description: "View branch by id" },
    CatalogEntry { name: UPDATE_BRANCH, description: "Update branch" },
    CatalogEntry { name: DELETE_BRANCH, description: "Delete branch" },
    CatalogEntry { name: RESTORE_BRANCH, description: "Restore branch" },
    // Locations
    CatalogEntry { name: VIEW_ALL_LOCATIONS, description: "View all locations" },
    CatalogEntry { name: CREATE_LOCATION, description: "Create location" },
    CatalogEntry { name: VIEW_LOCATION_BY_ID, description: "View location by id" },
    CatalogEntry { name: UPDATE_LOCATION, description: "Update location" },
    CatalogEntry { name: DELETE_LOCATION, description: "Delete location" },
    CatalogEntry { name: RESTORE_LOCATION, description: "Restore location" },
    // Company info
    CatalogEntry { name: VIEW_ALL_COMPANY_INFO, description: "View company info" },
    CatalogEntry { name: CREATE_COMPANY_INFO, description: "Create company info" },
    CatalogEntry { name: VIEW_COMPANY_INFO_BY_ID, description: "View company info by id" },
    CatalogEntry { name: UPDATE_COMPANY_INFO, description: "Update company info" },
    CatalogEntry { name: DELETE_COMPANY_INFO, description: "Delete company info" },
    CatalogEntry { name: RESTORE_COMPANY_INFO, description: "Restore company info" },
    // Chart of accounts
    CatalogEntry { name: VIEW_ALL_ACCOUNTS, description: "View all accounts" },
    CatalogEntry { name: CREATE_ACCOUNT, description: "Create account" },
    CatalogEntry { name: VIEW_ACCOUNT_BY_ID, description: "View account by id" },
    CatalogEntry { name: UPDATE_ACCOUNT, description: "Update account" },
    CatalogEntry { name: DELETE_ACCOUNT, description: "Delete account" },
    CatalogEntry { name: RESTORE_ACCOUNT, description: "Restore account" },
    CatalogEntry {
        name: DELETE_ALL_ACCOUNTS_PERMANENTLY,
        description: "Permanently delete all accounts",
    },
    // Transaction journals
    CatalogEntry { name: VIEW_ALL_TRANSACTIONS, description: "View all transactions" },
    CatalogEntry { name: VIEW_TRANSACTION_BY_ID, description: "View transaction by id" },
    CatalogEntry { name: CREATE_TRANSACTION, description: "Create transaction" },
    CatalogEntry { name: UPDATE_TRANSACTION, description: "Update transaction" },
    CatalogEntry { name: DELETE_TRANSACTION, description: "Delete transaction" },
    CatalogEntry { name: RESTORE_TRANSACTION, description: "Restore transaction" },
    // Transaction logs
    CatalogEntry { name: VIEW_ALL_TRANSACTION_LOGS, description: "View all transaction logs" },
    CatalogEntry { name: VIEW_TRANSACTION_LOG_BY_ID, description: "View transaction log by id" },
    CatalogEntry { name: CREATE_TRANSACTION_LOG, description: "Create transaction log" },
    CatalogEntry { name: DELETE_TRANSACTION_LOG, description: "Delete transaction log" },
    CatalogEntry { name: RESTORE_TRANSACTION_LOG, description: "Restore transaction log" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_names_are_unique() {
        let mut seen = HashSet::new();
        for entry in CATALOG {
            assert!(seen.insert(entry.name), "duplicate catalog name: {}", entry.name);
        }
    }

    #[test]
    fn catalog_names_follow_verb_entity_convention() {
        for entry in CATALOG {
            let first = entry.name.chars().next().unwrap();
            assert!(
                first.is_ascii_lowercase(),
                "catalog name should be lowerCamelCase: {}",
                entry.name
            );
            assert!(
                entry.name.chars().all(|c| c.is_ascii_alphanumeric()),
                "catalog name should be alphanumeric: {}",
                entry.name
            );
        }
    }

    #[test]
    fn every_entry_has_a_description() {
        for entry in CATALOG {
            assert!(!entry.description.is_empty());
        }
    }
}
