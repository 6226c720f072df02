//! PostgreSQL-backed `ProfileRepository` implementation.
//!
//! Roles are stored as text; a stored value outside the closed role set is
//! corruption and surfaces as an error rather than a defaulted role.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::profile::UserProfile;
use crate::domain::role::UserRole;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserProfileRow;
use super::pool::DbPool;
use super::schema::user_profiles;

/// Diesel-backed implementation of the `ProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: super::pool::PoolError) -> ProfileRepositoryError {
    map_pool_error(error, ProfileRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserProfileRow> = user_profiles::table
            .filter(user_profiles::user_id.eq(user_id))
            .select(UserProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(|row| {
            let stored_role = row.role.clone();
            UserProfile::try_from(row)
                .map_err(|_| ProfileRepositoryError::corrupt_role(stored_role))
        })
        .transpose()
    }

    async fn set_role(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<bool, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = diesel::update(
            user_profiles::table.filter(user_profiles::user_id.eq(user_id)),
        )
        .set((
            user_profiles::role.eq(role.as_str()),
            user_profiles::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(updated > 0)
    }

    async fn approve(&self, user_id: Uuid) -> Result<bool, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = diesel::update(
            user_profiles::table.filter(user_profiles::user_id.eq(user_id)),
        )
        .set((
            user_profiles::is_approved.eq(true),
            user_profiles::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(updated > 0)
    }
}
