//! Administrative referral procedures.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::ports::{ReferralRepository, ReferralRepositoryError};
use crate::domain::referral::{ClientReferral, ReferralKey, ReferralKeyError};

/// Service exposing the referral RPCs.
#[derive(Clone)]
pub struct ReferralService<R> {
    repository: Arc<R>,
}

impl<R> ReferralService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> ReferralService<R>
where
    R: ReferralRepository,
{
    /// Fetch the full referral row set for a year. Years with no activity
    /// yield an empty sequence, never an error.
    pub async fn referrals_for_year(
        &self,
        year: i32,
    ) -> Result<Vec<ClientReferral>, DomainError> {
        self.repository
            .list_for_year(year)
            .await
            .map_err(map_repository_error)
    }

    /// Replace the notes on one (specialist, year, month) row. Declared to
    /// return exactly one row: zero matches is a not-found error, multiple
    /// matches a conflict.
    pub async fn update_notes(
        &self,
        specialist_id: i64,
        year: i32,
        month: i32,
        notes: &str,
    ) -> Result<ClientReferral, DomainError> {
        let key = ReferralKey::try_new(specialist_id, year, month).map_err(map_key_error)?;
        self.repository
            .update_notes(key, notes)
            .await
            .map_err(map_repository_error)
    }

    /// Collapse duplicate (specialist, year, month) rows: counts are summed
    /// onto the oldest row, the rest are deleted. Returns rows removed.
    pub async fn merge_duplicates(&self) -> Result<u64, DomainError> {
        let groups = self
            .repository
            .list_duplicate_groups()
            .await
            .map_err(map_repository_error)?;

        let mut removed = 0;
        for group in groups {
            let Some((survivor, duplicates)) = group.split_first() else {
                continue;
            };
            if duplicates.is_empty() {
                continue;
            }
            let total: i32 = group.iter().map(|row| row.referral_count).sum();
            let drop_ids: Vec<i64> = duplicates.iter().map(|row| row.id).collect();
            debug!(
                survivor = survivor.id,
                dropped = drop_ids.len(),
                "consolidating duplicate referral rows"
            );
            removed += self
                .repository
                .consolidate(survivor.id, total, drop_ids)
                .await
                .map_err(map_repository_error)?;
        }
        Ok(removed)
    }
}

fn map_key_error(error: ReferralKeyError) -> DomainError {
    DomainError::invalid_request(error.to_string())
}

fn map_repository_error(error: ReferralRepositoryError) -> DomainError {
    match error {
        ReferralRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("referral repository unavailable: {message}"))
        }
        ReferralRepositoryError::Query { message } => {
            DomainError::internal(format!("referral repository error: {message}"))
        }
        ReferralRepositoryError::NotFound { .. } => DomainError::not_found(error.to_string()),
        ReferralRepositoryError::NotUnique { matches, .. } => {
            DomainError::conflict(error.to_string()).with_details(json!({ "matches": matches }))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use mockall::predicate::eq;

    use super::ReferralService;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{MockReferralRepository, ReferralRepositoryError};
    use crate::domain::referral::{ClientReferral, ReferralKey};

    fn referral(id: i64, specialist_id: i64, count: i32) -> ClientReferral {
        let now = Utc::now();
        ClientReferral {
            id,
            specialist_id,
            year: 2025,
            month: 4,
            referral_count: count,
            is_referred: count > 0,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn year_listing_passes_through_the_row_set() {
        let mut repo = MockReferralRepository::new();
        repo.expect_list_for_year()
            .with(eq(2025))
            .times(1)
            .return_once(|_| Ok(vec![referral(1, 7, 3)]));

        let service = ReferralService::new(Arc::new(repo));
        let rows = service.referrals_for_year(2025).await.expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].specialist_id, 7);
    }

    #[tokio::test]
    async fn note_update_returns_the_single_updated_row() {
        let key = ReferralKey::try_new(7, 2025, 4).expect("valid key");
        let mut repo = MockReferralRepository::new();
        repo.expect_update_notes()
            .withf(move |got_key, notes| *got_key == key && notes == "called twice")
            .times(1)
            .return_once(|_, _| {
                let mut row = referral(1, 7, 3);
                row.notes = Some("called twice".to_owned());
                Ok(row)
            });

        let service = ReferralService::new(Arc::new(repo));
        let row = service
            .update_notes(7, 2025, 4, "called twice")
            .await
            .expect("updated row");
        assert_eq!(row.notes.as_deref(), Some("called twice"));
    }

    #[tokio::test]
    async fn note_update_on_missing_row_is_not_found() {
        let mut repo = MockReferralRepository::new();
        repo.expect_update_notes().times(1).return_once(|key, _| {
            Err(ReferralRepositoryError::not_found(key))
        });

        let service = ReferralService::new(Arc::new(repo));
        let error = service
            .update_notes(7, 2025, 4, "x")
            .await
            .expect_err("missing row");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn ambiguous_note_update_is_a_conflict() {
        let mut repo = MockReferralRepository::new();
        repo.expect_update_notes().times(1).return_once(|key, _| {
            Err(ReferralRepositoryError::not_unique(key, 2))
        });

        let service = ReferralService::new(Arc::new(repo));
        let error = service
            .update_notes(7, 2025, 4, "x")
            .await
            .expect_err("ambiguous key");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn impossible_month_is_rejected_before_touching_the_store() {
        let mut repo = MockReferralRepository::new();
        repo.expect_update_notes().times(0);

        let service = ReferralService::new(Arc::new(repo));
        let error = service
            .update_notes(7, 2025, 13, "x")
            .await
            .expect_err("month 13");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn merge_sums_counts_onto_the_oldest_row() {
        let mut repo = MockReferralRepository::new();
        repo.expect_list_duplicate_groups()
            .times(1)
            .return_once(|| Ok(vec![vec![referral(1, 7, 2), referral(5, 7, 3)]]));
        repo.expect_consolidate()
            .with(eq(1), eq(5), eq(vec![5_i64]))
            .times(1)
            .return_once(|_, _, _| Ok(1));

        let service = ReferralService::new(Arc::new(repo));
        let removed = service.merge_duplicates().await.expect("merge");
        assert_eq!(removed, 1);
    }

    #[tokio::test]
    async fn merge_with_no_duplicates_removes_nothing() {
        let mut repo = MockReferralRepository::new();
        repo.expect_list_duplicate_groups()
            .times(1)
            .return_once(|| Ok(Vec::new()));
        repo.expect_consolidate().times(0);

        let service = ReferralService::new(Arc::new(repo));
        assert_eq!(service.merge_duplicates().await.expect("merge"), 0);
    }
}
