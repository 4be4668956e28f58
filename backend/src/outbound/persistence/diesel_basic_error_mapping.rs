//! Shared Diesel error mapping for the dashboard repositories.
//!
//! Every repository port error has a `Connection` and a `Query` variant;
//! these helpers pick the right constructor so services can answer 503 for
//! outages and 500 for everything else.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel error raised by `operation` into query or connection errors.
///
/// Driver details are logged at debug level and replaced by a short
/// message naming the operation.
pub fn map_basic_diesel_error<E, Q, C>(
    error: DieselError,
    operation: &'static str,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        other => debug!(error = %other, operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            connection(format!("{operation}: database connection lost"))
        }
        DieselError::NotFound => query(format!("{operation}: record not found")),
        DieselError::DeserializationError(_) => {
            query(format!("{operation}: unexpected column value"))
        }
        _ => query(format!("{operation}: database error")),
    }
}
