//! Admin role type.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Permission level of an admin account.
///
/// Only `Admin` may open the console and mutate content. `Viewer` accounts
/// can authenticate but are denied the dashboard; the role exists so an
/// account can be parked without deleting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access to the content console.
    Admin,
    /// Authenticated but denied the console.
    Viewer,
}

impl AdminRole {
    /// String form as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an [`AdminRole`] from a string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown admin role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for AdminRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for role in [AdminRole::Admin, AdminRole::Viewer] {
            assert_eq!(role.as_str().parse::<AdminRole>(), Ok(role));
        }
    }

    #[test]
    fn test_unknown_role() {
        assert!("superuser".parse::<AdminRole>().is_err());
    }
}
