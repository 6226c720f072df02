//! Port for recurring-billing subscription persistence.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::order::RecurringSubscription;

/// Errors raised by subscription repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionRepositoryError {
    /// Repository connection could not be established.
    #[error("subscription repository connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("subscription repository query failed: {message}")]
    Query {
        /// Underlying failure description.
        message: String,
    },
}

impl SubscriptionRepositoryError {
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

/// Port for subscription storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Fetch every active subscription.
    async fn list_active(&self)
    -> Result<Vec<RecurringSubscription>, SubscriptionRepositoryError>;

    /// Record that `generated_month` was billed on `billed_on` and advance
    /// `current_month` past it. The stamped date keeps the subscription out
    /// of any further billing run in the same calendar month.
    async fn mark_billed(
        &self,
        id: i64,
        generated_month: i32,
        billed_on: NaiveDate,
    ) -> Result<(), SubscriptionRepositoryError>;
}

/// Fixture implementation with no subscriptions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubscriptionRepository;

#[async_trait]
impl SubscriptionRepository for FixtureSubscriptionRepository {
    async fn list_active(
        &self,
    ) -> Result<Vec<RecurringSubscription>, SubscriptionRepositoryError> {
        Ok(Vec::new())
    }

    async fn mark_billed(
        &self,
        _id: i64,
        _generated_month: i32,
        _billed_on: NaiveDate,
    ) -> Result<(), SubscriptionRepositoryError> {
        Ok(())
    }
}
