//! Request extractors for authentication and role checks.
//!
//! - [`auth::AuthUser`] -- the caller identified by a JWT Bearer token.
//! - [`rbac::RequireAuth`] -- any signed-in user (mascot and mission routes).
//! - [`rbac::RequireAdmin`] -- the `admin` role (dashboard routes).

pub mod auth;
pub mod rbac;
