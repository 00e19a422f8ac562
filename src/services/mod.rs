use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod api;
pub mod billing;
pub mod drivers;
pub mod fleet;
pub mod garages;
pub mod requests;
pub mod screening;
pub mod settings;
pub mod signup;
pub mod vehicle;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint error: {0}")]
    TypeConstraint(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(msg) => ServiceError::Form(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
