//! Well-known role and permission names.
//!
//! These must match the names the member service stores on each role.

pub const ROLE_ADMIN: &str = "admin";

pub const PERM_READ: &str = "phone_live_status:read";
pub const PERM_SEARCH: &str = "phone_live_status:search";
pub const PERM_EXPORT: &str = "phone_live_status:export";

/// Whether a role with the given name and permission list grants `permission`.
///
/// The admin role grants everything regardless of its stored list.
pub fn grants(role_name: &str, permissions: &[String], permission: &str) -> bool {
    role_name == ROLE_ADMIN || permissions.iter().any(|p| p == permission)
}
