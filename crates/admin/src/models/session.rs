//! Session-stored types.

use serde::{Deserialize, Serialize};

use atelier_core::{AdminRole, AdminUserId, Email};

use crate::models::AdminUser;

/// Session-stored admin identity.
///
/// Only written after a successful login with the `admin` role; its
/// presence in the session is what unlocks the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Account's database ID.
    pub id: AdminUserId,
    /// Account email address.
    pub email: Email,
    /// Display name shown in the console chrome.
    pub name: String,
    /// Permission level, re-checked on every request.
    pub role: AdminRole,
}

impl From<&AdminUser> for CurrentAdmin {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
