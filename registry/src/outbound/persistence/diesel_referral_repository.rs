//! PostgreSQL-backed `ReferralRepository` implementation.
//!
//! `update_notes` deliberately runs without a uniqueness assumption on
//! (specialist, year, month): the key's row count decides between success,
//! not-found, and a conflict the caller must resolve by consolidating. The
//! count runs before the write, inside one transaction, so a conflicting key
//! leaves every row untouched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{ReferralRepository, ReferralRepositoryError};
use crate::domain::referral::{ClientReferral, ReferralKey};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::ClientReferralRow;
use super::pool::DbPool;
use super::schema::client_referrals;

/// Diesel-backed implementation of the `ReferralRepository` port.
#[derive(Clone)]
pub struct DieselReferralRepository {
    pool: DbPool,
}

impl DieselReferralRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: super::pool::PoolError) -> ReferralRepositoryError {
    map_pool_error(error, ReferralRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ReferralRepositoryError {
    map_diesel_error(
        error,
        ReferralRepositoryError::query,
        ReferralRepositoryError::connection,
    )
}

fn ensure_single_match(key: ReferralKey, matches: i64) -> Result<(), ReferralRepositoryError> {
    match matches {
        1 => Ok(()),
        0 => Err(ReferralRepositoryError::not_found(key)),
        many => Err(ReferralRepositoryError::not_unique(
            key,
            usize::try_from(many).unwrap_or(usize::MAX),
        )),
    }
}

#[async_trait]
impl ReferralRepository for DieselReferralRepository {
    async fn list_for_year(
        &self,
        year: i32,
    ) -> Result<Vec<ClientReferral>, ReferralRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ClientReferralRow> = client_referrals::table
            .filter(client_referrals::year.eq(year))
            .order((client_referrals::specialist_id, client_referrals::month))
            .select(ClientReferralRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(ClientReferral::from).collect())
    }

    async fn update_notes(
        &self,
        key: ReferralKey,
        notes: &str,
    ) -> Result<ClientReferral, ReferralRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let outcome = conn
            .transaction::<Result<ClientReferralRow, ReferralRepositoryError>, diesel::result::Error, _>(
                |conn| {
                    async move {
                        let matches: i64 = client_referrals::table
                            .filter(client_referrals::specialist_id.eq(key.specialist_id))
                            .filter(client_referrals::year.eq(key.year))
                            .filter(client_referrals::month.eq(key.month))
                            .count()
                            .get_result(conn)
                            .await?;
                        if let Err(error) = ensure_single_match(key, matches) {
                            return Ok(Err(error));
                        }

                        let row: ClientReferralRow = diesel::update(
                            client_referrals::table
                                .filter(client_referrals::specialist_id.eq(key.specialist_id))
                                .filter(client_referrals::year.eq(key.year))
                                .filter(client_referrals::month.eq(key.month)),
                        )
                        .set((
                            client_referrals::notes.eq(notes),
                            client_referrals::updated_at.eq(diesel::dsl::now),
                        ))
                        .get_result(conn)
                        .await?;
                        Ok(Ok(row))
                    }
                    .scope_boxed()
                },
            )
            .await
            .map_err(diesel_error)?;

        outcome.map(ClientReferral::from)
    }

    async fn list_duplicate_groups(
        &self,
    ) -> Result<Vec<Vec<ClientReferral>>, ReferralRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ClientReferralRow> = client_referrals::table
            .order((
                client_referrals::specialist_id,
                client_referrals::year,
                client_referrals::month,
                client_referrals::id,
            ))
            .select(ClientReferralRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        let mut groups: Vec<Vec<ClientReferral>> = Vec::new();
        let mut current: Vec<ClientReferral> = Vec::new();
        for row in rows {
            let referral = ClientReferral::from(row);
            let same_key = current.last().is_some_and(|last| {
                last.specialist_id == referral.specialist_id
                    && last.year == referral.year
                    && last.month == referral.month
            });
            if same_key {
                current.push(referral);
            } else {
                if current.len() > 1 {
                    groups.push(std::mem::take(&mut current));
                }
                current = vec![referral];
            }
        }
        if current.len() > 1 {
            groups.push(current);
        }
        Ok(groups)
    }

    async fn consolidate(
        &self,
        keep_id: i64,
        total_count: i32,
        drop_ids: Vec<i64>,
    ) -> Result<u64, ReferralRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let deleted = conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::update(client_referrals::table.find(keep_id))
                        .set((
                            client_referrals::referral_count.eq(total_count),
                            client_referrals::is_referred.eq(total_count > 0),
                            client_referrals::updated_at.eq(diesel::dsl::now),
                        ))
                        .execute(conn)
                        .await?;

                    diesel::delete(
                        client_referrals::table.filter(client_referrals::id.eq_any(drop_ids)),
                    )
                    .execute(conn)
                    .await
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        Ok(deleted as u64)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::outbound::persistence::pool::PoolError;

    #[rstest]
    fn pool_failures_surface_as_connection_errors() {
        let error = pool_error(PoolError::checkout("pool exhausted"));
        assert!(matches!(error, ReferralRepositoryError::Connection { .. }));
        assert!(error.to_string().contains("pool exhausted"));
    }

    #[rstest]
    fn diesel_failures_surface_as_query_errors() {
        let error = diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(error, ReferralRepositoryError::Query { .. }));
    }

    #[rstest]
    fn a_conflicting_key_is_rejected_before_any_write() {
        let key = ReferralKey::try_new(7, 2025, 3).expect("valid key");
        assert!(ensure_single_match(key, 1).is_ok());
        assert!(matches!(
            ensure_single_match(key, 0),
            Err(ReferralRepositoryError::NotFound { .. })
        ));
        assert!(matches!(
            ensure_single_match(key, 2),
            Err(ReferralRepositoryError::NotUnique { matches: 2, .. })
        ));
    }
}
