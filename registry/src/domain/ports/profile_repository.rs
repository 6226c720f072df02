//! Port for account profile persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::profile::UserProfile;
use crate::domain::role::UserRole;

/// Errors raised by profile repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileRepositoryError {
    /// Repository connection could not be established.
    #[error("profile repository connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("profile repository query failed: {message}")]
    Query {
        /// Underlying failure description.
        message: String,
    },
    /// A stored role fell outside the closed enumeration.
    #[error("stored role is outside the closed set: {value}")]
    CorruptRole {
        /// The offending stored value.
        value: String,
    },
}

impl ProfileRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a corrupt-role error for the given stored value.
    pub fn corrupt_role(value: impl Into<String>) -> Self {
        Self::CorruptRole {
            value: value.into(),
        }
    }
}

/// Port for profile storage.
///
/// Role writes take [`UserRole`] rather than a string, so values outside the
/// closed set are unrepresentable at this boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile attached to an account.
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, ProfileRepositoryError>;

    /// Assign a role. Returns whether a profile row was updated.
    async fn set_role(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<bool, ProfileRepositoryError>;

    /// Mark an account approved. Returns whether a profile row was updated.
    async fn approve(&self, user_id: Uuid) -> Result<bool, ProfileRepositoryError>;
}

/// Fixture implementation with no profiles.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn find_by_user_id(
        &self,
        _user_id: Uuid,
    ) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn set_role(
        &self,
        _user_id: Uuid,
        _role: UserRole,
    ) -> Result<bool, ProfileRepositoryError> {
        Ok(false)
    }

    async fn approve(&self, _user_id: Uuid) -> Result<bool, ProfileRepositoryError> {
        Ok(false)
    }
}
