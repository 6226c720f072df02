//! Port for order persistence.
//!
//! Orders are soft-deleted; every read accepts a [`DeletedFilter`] so callers
//! must say explicitly when they want tombstoned rows back. The default for
//! all read paths is [`DeletedFilter::ExcludeDeleted`].

use async_trait::async_trait;

use crate::domain::order::{Order, OrderDraft};

/// Whether a read should surface soft-deleted rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletedFilter {
    /// Hide rows with a non-null `deleted_at` (the default).
    #[default]
    ExcludeDeleted,
    /// Return tombstoned rows as well.
    IncludeDeleted,
}

/// Errors raised by order repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderRepositoryError {
    /// Repository connection could not be established.
    #[error("order repository connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("order repository query failed: {message}")]
    Query {
        /// Underlying failure description.
        message: String,
    },
    /// An insert or update referenced a missing parent order.
    #[error("order references a missing parent order")]
    MissingParent,
}

impl OrderRepositoryError {
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

/// Port for order storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order, returning the stored row with generated columns
    /// (`id`, `status`, timestamps) filled by the store.
    async fn insert(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError>;

    /// Fetch one order by id.
    async fn find_by_id(
        &self,
        id: i64,
        filter: DeletedFilter,
    ) -> Result<Option<Order>, OrderRepositoryError>;

    /// List orders, newest first.
    async fn list(&self, filter: DeletedFilter) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Soft-delete an order by stamping `deleted_at`. Returns whether a live
    /// row was tombstoned.
    async fn soft_delete(&self, id: i64) -> Result<bool, OrderRepositoryError>;
}

/// Fixture implementation that stores nothing and finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderRepository;

#[async_trait]
impl OrderRepository for FixtureOrderRepository {
    async fn insert(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError> {
        let now = chrono::Utc::now();
        Ok(Order {
            id: 0,
            customer_name: draft.customer_name.clone(),
            customer_email: draft.customer_email.clone(),
            customer_phone: draft.customer_phone.clone(),
            package_name: draft.package_name.clone(),
            package_type: draft.package_type.clone(),
            amount: draft.amount,
            payment_method: draft.payment_method.clone(),
            status: "pending".to_owned(),
            parent_order_id: draft.parent_order_id,
            invoice_number: None,
            invoice_issued_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_id(
        &self,
        _id: i64,
        _filter: DeletedFilter,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(None)
    }

    async fn list(&self, _filter: DeletedFilter) -> Result<Vec<Order>, OrderRepositoryError> {
        Ok(Vec::new())
    }

    async fn soft_delete(&self, _id: i64) -> Result<bool, OrderRepositoryError> {
        Ok(false)
    }
}
