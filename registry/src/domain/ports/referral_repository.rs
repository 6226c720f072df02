//! Port for referral record persistence.

use async_trait::async_trait;

use crate::domain::referral::{ClientReferral, ReferralKey};

/// Errors raised by referral repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferralRepositoryError {
    /// Repository connection could not be established.
    #[error("referral repository connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("referral repository query failed: {message}")]
    Query {
        /// Underlying failure description.
        message: String,
    },
    /// A single-row operation matched no rows.
    #[error("no referral row matches specialist {specialist_id} {year}-{month:02}")]
    NotFound {
        /// Targeted specialist.
        specialist_id: i64,
        /// Targeted year.
        year: i32,
        /// Targeted month.
        month: i32,
    },
    /// A single-row operation matched more than one row.
    #[error("{matches} referral rows match specialist {specialist_id} {year}-{month:02}")]
    NotUnique {
        /// Targeted specialist.
        specialist_id: i64,
        /// Targeted year.
        year: i32,
        /// Targeted month.
        month: i32,
        /// How many rows matched.
        matches: usize,
    },
}

impl ReferralRepositoryError {
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

    /// Create a not-found error for the given key.
    pub fn not_found(key: ReferralKey) -> Self {
        Self::NotFound {
            specialist_id: key.specialist_id,
            year: key.year,
            month: key.month,
        }
    }

    /// Create a non-unique error for the given key and match count.
    pub fn not_unique(key: ReferralKey, matches: usize) -> Self {
        Self::NotUnique {
            specialist_id: key.specialist_id,
            year: key.year,
            month: key.month,
            matches,
        }
    }
}

/// Port for referral record storage.
///
/// `update_notes` is declared to return exactly one row: adapters must fail
/// with [`ReferralRepositoryError::NotFound`] on zero matches and
/// [`ReferralRepositoryError::NotUnique`] when the key is ambiguous, never
/// silently pick one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferralRepository: Send + Sync {
    /// Fetch every referral row recorded for a year. Empty when the year has
    /// no records.
    async fn list_for_year(&self, year: i32)
    -> Result<Vec<ClientReferral>, ReferralRepositoryError>;

    /// Replace the notes on the single row addressed by `key`, returning the
    /// updated row with its `updated_at` advanced.
    async fn update_notes(
        &self,
        key: ReferralKey,
        notes: &str,
    ) -> Result<ClientReferral, ReferralRepositoryError>;

    /// Group rows sharing a (specialist, year, month) key. Each returned
    /// group holds at least two rows, ordered by ascending id.
    async fn list_duplicate_groups(
        &self,
    ) -> Result<Vec<Vec<ClientReferral>>, ReferralRepositoryError>;

    /// Fold a duplicate group into its surviving row: set the survivor's
    /// count to `total_count` and delete `drop_ids`. Returns rows deleted.
    async fn consolidate(
        &self,
        keep_id: i64,
        total_count: i32,
        drop_ids: Vec<i64>,
    ) -> Result<u64, ReferralRepositoryError>;
}

/// Fixture implementation backed by no data at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReferralRepository;

#[async_trait]
impl ReferralRepository for FixtureReferralRepository {
    async fn list_for_year(
        &self,
        _year: i32,
    ) -> Result<Vec<ClientReferral>, ReferralRepositoryError> {
        Ok(Vec::new())
    }

    async fn update_notes(
        &self,
        key: ReferralKey,
        _notes: &str,
    ) -> Result<ClientReferral, ReferralRepositoryError> {
        Err(ReferralRepositoryError::not_found(key))
    }

    async fn list_duplicate_groups(
        &self,
    ) -> Result<Vec<Vec<ClientReferral>>, ReferralRepositoryError> {
        Ok(Vec::new())
    }

    async fn consolidate(
        &self,
        _keep_id: i64,
        _total_count: i32,
        _drop_ids: Vec<i64>,
    ) -> Result<u64, ReferralRepositoryError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{FixtureReferralRepository, ReferralRepository, ReferralRepositoryError};
    use crate::domain::referral::ReferralKey;

    #[tokio::test]
    async fn fixture_listing_is_empty() {
        let repo = FixtureReferralRepository;
        let rows = repo.list_for_year(2025).await.expect("list succeeds");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn fixture_update_reports_not_found() {
        let repo = FixtureReferralRepository;
        let key = ReferralKey::try_new(5, 2025, 3).expect("valid key");
        let error = repo.update_notes(key, "note").await.expect_err("no rows");
        assert!(matches!(error, ReferralRepositoryError::NotFound { .. }));
    }

    #[rstest]
    fn not_unique_error_names_the_key_and_match_count() {
        let key = ReferralKey::try_new(5, 2025, 3).expect("valid key");
        let error = ReferralRepositoryError::not_unique(key, 2);
        let message = error.to_string();
        assert!(message.contains("2 referral rows"));
        assert!(message.contains("2025-03"));
    }
}
