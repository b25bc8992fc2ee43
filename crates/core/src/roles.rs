//! Well-known role name constants and the role-hierarchy predicate.
//!
//! These must match the seed data inserted by the bootstrap step.

pub const ROLE_SYSADMIN: &str = "sysadmin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_REGULAR: &str = "regular";

/// All seeded role names, in seed order.
pub const ALL_ROLES: &[&str] = &[ROLE_SYSADMIN, ROLE_ADMIN, ROLE_MANAGER, ROLE_REGULAR];

/// Coarse role gate: a principal satisfies a required role when it holds
/// that exact role, or when it is `sysadmin` (which passes every gate).
pub fn satisfies(actual: &str, required: &str) -> bool {
    actual == required || actual == ROLE_SYSADMIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_role_satisfies_itself() {
        assert!(satisfies(ROLE_MANAGER, ROLE_MANAGER));
        assert!(satisfies(ROLE_REGULAR, ROLE_REGULAR));
    }

    #[test]
    fn sysadmin_satisfies_every_gate() {
        for required in ALL_ROLES {
            assert!(satisfies(ROLE_SYSADMIN, required));
        }
    }

    #[test]
    fn other_roles_do_not_cross() {
        assert!(!satisfies(ROLE_ADMIN, ROLE_MANAGER));
        assert!(!satisfies(ROLE_MANAGER, ROLE_ADMIN));
        assert!(!satisfies(ROLE_REGULAR, ROLE_SYSADMIN));
    }

    #[test]
    fn unknown_role_satisfies_nothing() {
        assert!(!satisfies("auditor", ROLE_REGULAR));
    }
}
