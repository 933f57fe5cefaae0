//! Business operations layered over the repository traits.
//!
//! Every function is generic over the traits it needs so that the same code
//! runs against [`crate::repository::DieselRepository`] and the mock.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod appointment;
pub mod catalog;
pub mod ledger;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("invalid form: {0}")]
    Form(String),

    #[error("invalid value: {0}")]
    TypeConstraint(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_not_found_becomes_service_not_found() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConnectionError("down".into())),
            ServiceError::Repository(_)
        ));
    }
}
