//! Application account roles.
//!
//! `user_profiles.role` is a closed enumeration; every write path that sets
//! the column must go through [`UserRole::parse`] so unknown values are
//! rejected here rather than surfacing as a store-level constraint error.

use serde::{Deserialize, Serialize};

/// Closed set of application roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Platform administrator.
    Admin,
    /// Service provider with a public profile.
    Specialist,
    /// Regular end user.
    User,
    /// Back-office staff.
    Staff,
    /// Legal department account.
    Legal,
}

/// Error returned when a role string falls outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user role: {value}")]
pub struct UnknownRoleError {
    /// The rejected input.
    pub value: String,
}

impl UserRole {
    /// All roles, in display order.
    pub const ALL: [Self; 5] = [
        Self::Admin,
        Self::Specialist,
        Self::User,
        Self::Staff,
        Self::Legal,
    ];

    /// The stored string form of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Specialist => "specialist",
            Self::User => "user",
            Self::Staff => "staff",
            Self::Legal => "legal",
        }
    }

    /// Parse a stored role string, rejecting anything outside the closed set.
    pub fn parse(value: &str) -> Result<Self, UnknownRoleError> {
        match value {
            "admin" => Ok(Self::Admin),
            "specialist" => Ok(Self::Specialist),
            "user" => Ok(Self::User),
            "staff" => Ok(Self::Staff),
            "legal" => Ok(Self::Legal),
            other => Err(UnknownRoleError {
                value: other.to_owned(),
            }),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
