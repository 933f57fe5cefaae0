//! Errors raised by the persistence layer.
//!
//! SQLite reports rule breaks in the salon schema as constraint failures:
//! duplicate staff emails, bookings pointing at a client, employee or
//! treatment that does not exist, staff removed while appointments still
//! reference them, and slots or prices rejected by a `CHECK`. All of them
//! surface as [`RepositoryError::ConstraintViolation`].

use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Turns a zero-row update into [`RepositoryError::NotFound`].
pub(crate) fn require_affected(affected: usize) -> RepositoryResult<()> {
    if affected == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}

fn constraint_error(kind: DatabaseErrorKind, message: String) -> RepositoryError {
    let rule = match kind {
        DatabaseErrorKind::UniqueViolation => "duplicate value",
        DatabaseErrorKind::ForeignKeyViolation => "missing or still referenced record",
        DatabaseErrorKind::NotNullViolation => "required value missing",
        DatabaseErrorKind::CheckViolation => "value out of range",
        _ => return RepositoryError::DatabaseError(message),
    };
    RepositoryError::ConstraintViolation(format!("{rule}: {message}"))
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => {
                constraint_error(kind, info.message().to_string())
            }
            DieselError::SerializationError(e) | DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(format!("Malformed column value: {e}"))
            }
            DieselError::RollbackTransaction
            | DieselError::AlreadyInTransaction
            | DieselError::NotInTransaction
            | DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError(format!("Transaction failed: {err}"))
            }
            _ => RepositoryError::Unexpected(format!("Unexpected diesel error: {err}")),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(format!("Salon database unavailable: {err}"))
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(format!("Salon database unavailable: {err}"))
    }
}
