//! Shared Diesel error mapping for the repositories in this module.
//!
//! Both repository error enums expose `connection` and `query` constructors;
//! these helpers pick between them so adapters stay one-liners.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto a repository connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.into_message())
}

/// Map a Diesel failure onto repository query/connection errors.
///
/// The database's own message is kept so the domain failure boundary can log
/// it; it never reaches clients.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "database connection closed");
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name().unwrap_or("unknown").to_owned();
            debug!(%constraint, "unique constraint violated");
            query(format!("unique constraint {constraint} violated"))
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            query(info.message().to_owned())
        }
        DieselError::NotFound => query("record not found".to_owned()),
        other => {
            debug!(error = %other, "diesel operation failed");
            query(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UserPersistenceError;
    use rstest::rstest;

    fn as_user_error(error: DieselError) -> UserPersistenceError {
        map_diesel_error(
            error,
            UserPersistenceError::query,
            UserPersistenceError::connection,
        )
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(
            as_user_error(DieselError::NotFound),
            UserPersistenceError::query("record not found")
        );
    }

    #[rstest]
    fn closed_connections_are_connection_errors() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert_eq!(
            as_user_error(error),
            UserPersistenceError::connection("server closed the connection")
        );
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(
            PoolError::checkout("timed out"),
            UserPersistenceError::connection,
        );
        assert_eq!(mapped, UserPersistenceError::connection("timed out"));
    }
}
