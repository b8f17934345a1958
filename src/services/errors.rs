use thiserror::Error;

/// Failure points of the listing and messaging workflows.
///
/// Each variant is recovered at the workflow boundary and rendered as a short
/// message; none of them is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Client-side validation failed; no network call was made.
    #[error("{0}")]
    InvalidInput(String),
    /// The image could not be stored.
    #[error("failed to upload image")]
    UploadFailed,
    /// The record could not be inserted.
    #[error("failed to save record")]
    PersistenceFailed,
    /// Listings could not be loaded.
    #[error("failed to load listings")]
    QueryFailed,
    /// Requested listing does not exist.
    #[error("not found")]
    NotFound,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
