//! PostgreSQL-backed `SubscriptionRepository` implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_types::{Array, Integer};
use diesel_async::RunQueryDsl;

use crate::domain::order::RecurringSubscription;
use crate::domain::ports::{SubscriptionRepository, SubscriptionRepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::AutomaticOrderRow;
use super::pool::DbPool;
use super::schema::automatic_orders;

/// Diesel-backed implementation of the `SubscriptionRepository` port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: super::pool::PoolError) -> SubscriptionRepositoryError {
    map_pool_error(error, SubscriptionRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> SubscriptionRepositoryError {
    map_diesel_error(
        error,
        SubscriptionRepositoryError::query,
        SubscriptionRepositoryError::connection,
    )
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn list_active(
        &self,
    ) -> Result<Vec<RecurringSubscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<AutomaticOrderRow> = automatic_orders::table
            .filter(automatic_orders::is_active.eq(true))
            .order(automatic_orders::id)
            .select(AutomaticOrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(RecurringSubscription::from).collect())
    }

    async fn mark_billed(
        &self,
        id: i64,
        generated_month: i32,
        billed_on: NaiveDate,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::update(automatic_orders::table.find(id))
            .set((
                automatic_orders::paid_months.eq(diesel::dsl::sql::<Array<Integer>>(
                    "array_append(paid_months, ",
                )
                .bind::<Integer, _>(generated_month)
                .sql(")")),
                automatic_orders::current_month.eq(automatic_orders::current_month + 1),
                automatic_orders::last_billed_on.eq(billed_on),
                automatic_orders::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(())
    }
}
