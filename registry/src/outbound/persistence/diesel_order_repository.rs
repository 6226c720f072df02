//! PostgreSQL-backed `OrderRepository` implementation.
//!
//! Soft deletion is a stamped `deleted_at`; no code path issues a physical
//! `DELETE` against `orders`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::order::{Order, OrderDraft};
use crate::domain::ports::{DeletedFilter, OrderRepository, OrderRepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewOrderRow, OrderRow};
use super::pool::DbPool;
use super::schema::orders;

/// Diesel-backed implementation of the `OrderRepository` port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: super::pool::PoolError) -> OrderRepositoryError {
    map_pool_error(error, OrderRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> OrderRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    // A violated parent FK is the one constraint callers can act on.
    if let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) = &error {
        return OrderRepositoryError::MissingParent;
    }
    map_diesel_error(
        error,
        OrderRepositoryError::query,
        OrderRepositoryError::connection,
    )
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn insert(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: OrderRow = diesel::insert_into(orders::table)
            .values(NewOrderRow::from_draft(draft))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(Order::from(row))
    }

    async fn find_by_id(
        &self,
        id: i64,
        filter: DeletedFilter,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = orders::table
            .select(OrderRow::as_select())
            .filter(orders::id.eq(id))
            .into_boxed();
        if filter == DeletedFilter::ExcludeDeleted {
            query = query.filter(orders::deleted_at.is_null());
        }
        let row: Option<OrderRow> = query
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(Order::from))
    }

    async fn list(&self, filter: DeletedFilter) -> Result<Vec<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = orders::table
            .select(OrderRow::as_select())
            .order(orders::created_at.desc())
            .into_boxed();
        if filter == DeletedFilter::ExcludeDeleted {
            query = query.filter(orders::deleted_at.is_null());
        }
        let rows: Vec<OrderRow> = query
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        // Already-tombstoned rows are left alone so the first deletion
        // timestamp survives repeated calls.
        let stamped = diesel::update(
            orders::table
                .find(id)
                .filter(orders::deleted_at.is_null()),
        )
        .set((
            orders::deleted_at.eq(diesel::dsl::now),
            orders::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(stamped > 0)
    }
}
