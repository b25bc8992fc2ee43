//! Composable per-route authorization policies.
//!
//! A [`Policy`] is an AND-combination of two predicate kinds: a coarse role
//! gate ([`Requirement::RoleAtLeast`]) and a fine-grained named-capability
//! check ([`Requirement::HasPermission`]). Routes declare exactly one policy;
//! evaluation happens against the authenticated principal's role name and
//! resolved permission-name set. A denial names the failing requirement so
//! access-policy gaps stay debuggable.

use std::collections::HashSet;
use std::fmt;

use crate::roles;

/// A single authorization predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Passes when the principal holds this exact role, or `sysadmin`.
    RoleAtLeast(&'static str),
    /// Passes when the named capability is in the principal's permission set.
    HasPermission(&'static str),
}

/// The reason a policy evaluation failed. The first unsatisfied requirement
/// wins; later requirements are not evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    RoleTooLow { required: &'static str },
    MissingPermission { name: &'static str },
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::RoleTooLow { required } => write!(f, "Role '{required}' required"),
            Denial::MissingPermission { name } => write!(f, "No permission: {name}"),
        }
    }
}

/// An AND-combination of [`Requirement`]s. An empty policy admits any
/// authenticated principal.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    requirements: Vec<Requirement>,
}

impl Policy {
    /// A policy that admits any authenticated principal.
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// A policy requiring the given role (or `sysadmin`).
    pub fn role_at_least(role: &'static str) -> Self {
        Self {
            requirements: vec![Requirement::RoleAtLeast(role)],
        }
    }

    /// A policy requiring the named capability.
    pub fn permission(name: &'static str) -> Self {
        Self {
            requirements: vec![Requirement::HasPermission(name)],
        }
    }

    /// AND an additional role gate onto this policy.
    pub fn and_role_at_least(mut self, role: &'static str) -> Self {
        self.requirements.push(Requirement::RoleAtLeast(role));
        self
    }

    /// AND an additional capability check onto this policy.
    pub fn and_permission(mut self, name: &'static str) -> Self {
        self.requirements.push(Requirement::HasPermission(name));
        self
    }

    /// Evaluate every requirement against the principal's role and resolved
    /// permission-name set. Returns the first unsatisfied requirement.
    pub fn evaluate(&self, role: &str, permissions: &HashSet<String>) -> Result<(), Denial> {
        for requirement in &self.requirements {
            match requirement {
                Requirement::RoleAtLeast(required) => {
                    if !roles::satisfies(role, required) {
                        return Err(Denial::RoleTooLow { required });
                    }
                }
                Requirement::HasPermission(name) => {
                    if !permissions.contains(*name) {
                        return Err(Denial::MissingPermission { name });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{ROLE_ADMIN, ROLE_REGULAR, ROLE_SYSADMIN};

    fn perms(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_policy_admits_anyone() {
        let policy = Policy::authenticated();
        assert!(policy.evaluate(ROLE_REGULAR, &perms(&[])).is_ok());
    }

    #[test]
    fn permission_policy_requires_membership() {
        let policy = Policy::permission("deleteAgent");

        assert!(policy.evaluate(ROLE_REGULAR, &perms(&["deleteAgent"])).is_ok());

        let denial = policy
            .evaluate(ROLE_REGULAR, &perms(&["viewAllAgents"]))
            .unwrap_err();
        assert_eq!(denial, Denial::MissingPermission { name: "deleteAgent" });
        assert_eq!(denial.to_string(), "No permission: deleteAgent");
    }

    #[test]
    fn role_policy_admits_sysadmin_everywhere() {
        let policy = Policy::role_at_least(ROLE_ADMIN);
        assert!(policy.evaluate(ROLE_SYSADMIN, &perms(&[])).is_ok());
        assert!(policy.evaluate(ROLE_ADMIN, &perms(&[])).is_ok());

        let denial = policy.evaluate(ROLE_REGULAR, &perms(&[])).unwrap_err();
        assert_eq!(denial.to_string(), "Role 'admin' required");
    }

    #[test]
    fn stacked_requirements_are_all_required() {
        let policy =
            Policy::role_at_least(ROLE_SYSADMIN).and_permission("deleteTransactionLog");

        // Role passes but the capability is missing.
        let denial = policy.evaluate(ROLE_SYSADMIN, &perms(&[])).unwrap_err();
        assert_eq!(
            denial,
            Denial::MissingPermission { name: "deleteTransactionLog" }
        );

        // Capability present but the role gate fails first.
        let denial = policy
            .evaluate(ROLE_ADMIN, &perms(&["deleteTransactionLog"]))
            .unwrap_err();
        assert_eq!(denial, Denial::RoleTooLow { required: ROLE_SYSADMIN });

        // Both satisfied.
        assert!(policy
            .evaluate(ROLE_SYSADMIN, &perms(&["deleteTransactionLog"]))
            .is_ok());
    }
}
