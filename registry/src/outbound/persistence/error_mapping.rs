//! Shared error mapping for Diesel-backed adapters.

use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure into an adapter's connection error constructor.
pub fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel failures into query/connection constructors. Closed
/// connections count as connection errors; everything else is a query error.
pub fn map_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::Error as DieselError;
    use rstest::rstest;

    use super::{map_diesel_error, map_pool_error};
    use crate::domain::ports::ReferralRepositoryError;

    #[rstest]
    fn pool_failures_become_connection_errors() {
        let error = map_pool_error(
            super::PoolError::checkout("pool exhausted"),
            ReferralRepositoryError::connection,
        );
        assert_eq!(
            error,
            ReferralRepositoryError::connection("pool exhausted")
        );
    }

    #[rstest]
    fn not_found_becomes_a_query_error() {
        let error: ReferralRepositoryError = map_diesel_error(
            DieselError::NotFound,
            ReferralRepositoryError::query,
            ReferralRepositoryError::connection,
        );
        assert_eq!(error, ReferralRepositoryError::query("record not found"));
    }
}
