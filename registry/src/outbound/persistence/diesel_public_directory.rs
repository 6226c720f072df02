//! PostgreSQL-backed `PublicDirectory` implementation.
//!
//! The select lists here are the privacy boundary: contact columns are never
//! part of the query, so a sanitisation bug cannot reintroduce them.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PublicDirectory, PublicDirectoryError};
use crate::domain::public_profiles::{PublicReview, PublicSpecialist};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{PublicReviewRow, PublicSpecialistRow};
use super::pool::DbPool;
use super::schema::{reviews, specialists};

const APPROVED_REVIEW_STATUS: &str = "approved";

/// Diesel-backed implementation of the `PublicDirectory` port.
#[derive(Clone)]
pub struct DieselPublicDirectory {
    pool: DbPool,
}

impl DieselPublicDirectory {
    /// Create a directory over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: super::pool::PoolError) -> PublicDirectoryError {
    map_pool_error(error, PublicDirectoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> PublicDirectoryError {
    map_diesel_error(
        error,
        PublicDirectoryError::query,
        PublicDirectoryError::connection,
    )
}

#[async_trait]
impl PublicDirectory for DieselPublicDirectory {
    async fn public_specialists(&self) -> Result<Vec<PublicSpecialist>, PublicDirectoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<PublicSpecialistRow> = specialists::table
            .filter(specialists::is_active.eq(true))
            .order(specialists::name)
            .select(PublicSpecialistRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(PublicSpecialist::from).collect())
    }

    async fn public_reviews(
        &self,
        specialist_id: Option<i64>,
    ) -> Result<Vec<PublicReview>, PublicDirectoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = reviews::table
            .select(PublicReviewRow::as_select())
            .filter(reviews::status.eq(APPROVED_REVIEW_STATUS))
            .order(reviews::created_at.desc())
            .into_boxed();
        if let Some(specialist_id) = specialist_id {
            query = query.filter(reviews::specialist_id.eq(specialist_id));
        }
        let rows: Vec<PublicReviewRow> = query
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(PublicReview::from).collect())
    }
}
