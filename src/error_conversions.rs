//! Error conversion glue between the form, domain, repository and service
//! layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the conversions live here instead of next to the types they convert.

use crate::domain::types::TypeConstraintError;
use crate::forms::listings::{CreateListingFormError, SearchListingsFormError};
use crate::forms::messages::SendMessageFormError;
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<SearchListingsFormError> for ServiceError {
    fn from(val: SearchListingsFormError) -> Self {
        ServiceError::InvalidInput(val.to_string())
    }
}

impl From<CreateListingFormError> for ServiceError {
    fn from(val: CreateListingFormError) -> Self {
        ServiceError::InvalidInput(val.to_string())
    }
}

impl From<SendMessageFormError> for ServiceError {
    fn from(val: SendMessageFormError) -> Self {
        ServiceError::InvalidInput(val.to_string())
    }
}
