//! Error conversion glue for `data` feature consumers.
//!
//! The domain layer must not depend on service or repository error types,
//! so the conversions out of [`TypeConstraintError`] live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
