//! Port for the sanitized public directory.

use async_trait::async_trait;

use crate::domain::public_profiles::{PublicReview, PublicSpecialist};

/// Errors raised by public directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublicDirectoryError {
    /// Directory connection could not be established.
    #[error("public directory connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// Query failed during execution.
    #[error("public directory query failed: {message}")]
    Query {
        /// Underlying failure description.
        message: String,
    },
}

impl PublicDirectoryError {
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
}

/// Read-only port serving anonymous consumers. Implementations must only
/// surface active specialists and approved reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicDirectory: Send + Sync {
    /// Sanitized profiles of every active specialist.
    async fn public_specialists(&self) -> Result<Vec<PublicSpecialist>, PublicDirectoryError>;

    /// Approved reviews, optionally narrowed to one specialist. Empty when
    /// nothing matches.
    async fn public_reviews(
        &self,
        specialist_id: Option<i64>,
    ) -> Result<Vec<PublicReview>, PublicDirectoryError>;
}

/// Fixture implementation with an empty directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePublicDirectory;

#[async_trait]
impl PublicDirectory for FixturePublicDirectory {
    async fn public_specialists(&self) -> Result<Vec<PublicSpecialist>, PublicDirectoryError> {
        Ok(Vec::new())
    }

    async fn public_reviews(
        &self,
        _specialist_id: Option<i64>,
    ) -> Result<Vec<PublicReview>, PublicDirectoryError> {
        Ok(Vec::new())
    }
}
