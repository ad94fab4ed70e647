//! Shared helpers for the Diesel repositories.
//!
//! - Error mapping from pool and Diesel failures to port error constructors.
//! - Constraint-violation checks used to translate unique and foreign-key
//!   failures into typed port errors.
//! - Conversions between stored integers and domain values.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.into_message())
}

/// Map Diesel errors into query/connection constructors.
///
/// Callers handle constraint violations they care about before falling back
/// to this mapping.
pub(crate) fn map_basic_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
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
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        _ => query("database error"),
    }
}

/// Whether the error is a unique-constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Whether the error is a foreign-key violation.
pub(crate) fn is_foreign_key_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

/// Stored revisions are positive `INTEGER`s.
pub(crate) fn revision_from_db(revision: i32) -> Option<u32> {
    u32::try_from(revision).ok()
}

/// Domain revisions beyond `i32::MAX` cannot match any stored row.
pub(crate) fn revision_to_db(revision: u32) -> Option<i32> {
    i32::try_from(revision).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(String),
    }

    #[rstest]
    fn pool_failures_become_connection_errors() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        let mapped = map_basic_diesel_error(DieselError::NotFound, Mapped::Query, |message| {
            Mapped::Connection(message.to_owned())
        });
        assert_eq!(mapped, Mapped::Query("record not found"));
    }

    #[rstest]
    fn non_database_errors_are_not_violations() {
        assert!(!is_unique_violation(&DieselError::NotFound));
        assert!(!is_foreign_key_violation(&DieselError::RollbackTransaction));
    }

    #[rstest]
    #[case(1, Some(1))]
    #[case(-1, None)]
    fn revisions_round_trip_only_when_representable(
        #[case] stored: i32,
        #[case] expected: Option<u32>,
    ) {
        assert_eq!(revision_from_db(stored), expected);
        assert_eq!(revision_to_db(u32::MAX), None);
    }
}
