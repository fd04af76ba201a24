//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the viewer from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireProvider`] -- Requires the `provider` role.

pub mod auth;
pub mod rbac;
