//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role`.

use crate::error::CoreError;

pub const ROLE_CLIENT: &str = "client";
pub const ROLE_PROVIDER: &str = "provider";
pub const ROLE_ADMIN: &str = "admin";

/// Roles a caller may pick for themself at registration.
pub const SELF_REGISTRABLE_ROLES: &[&str] = &[ROLE_CLIENT, ROLE_PROVIDER];

/// Validate the role requested at registration. Admins are never self-registered.
pub fn validate_registration_role(role: &str) -> Result<(), CoreError> {
    if SELF_REGISTRABLE_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            SELF_REGISTRABLE_ROLES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_and_provider_can_register() {
        assert!(validate_registration_role(ROLE_CLIENT).is_ok());
        assert!(validate_registration_role(ROLE_PROVIDER).is_ok());
    }

    #[test]
    fn admin_cannot_self_register() {
        assert!(validate_registration_role(ROLE_ADMIN).is_err());
        assert!(validate_registration_role("").is_err());
    }
}
