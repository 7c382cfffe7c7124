//! Admin account domain type.

use chrono::{DateTime, Utc};

use atelier_core::{AdminRole, AdminUserId, Email};

/// An admin account (domain type).
///
/// `password_hash` is an Argon2id PHC string; it never leaves the auth
/// service.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// Unique account ID.
    pub id: AdminUserId,
    /// Account email address (login name).
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Argon2id PHC hash of the account password.
    pub password_hash: String,
    /// Permission level, checked at login and on every console request.
    pub role: AdminRole,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
