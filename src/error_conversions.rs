//! Conversion glue between the error families of the different layers.
//!
//! The domain layer must not depend on service/repository error types, and
//! the listing core must not depend on the persistence layer; the conversions
//! between them live here instead.

use crate::domain::types::TypeConstraintError;
use crate::listing::ListingError;
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

impl From<RepositoryError> for ListingError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::ConnectionError(msg) => ListingError::Transport(msg),
            other => ListingError::Application(other.to_string()),
        }
    }
}

impl From<ListingError> for ServiceError {
    fn from(val: ListingError) -> Self {
        ServiceError::Internal(val.to_string())
    }
}
