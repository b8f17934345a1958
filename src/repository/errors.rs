use thiserror::Error;

/// Errors raised while talking to the hosted store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The request could not be sent or the response body could not be read.
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The store answered with a non-success status code.
    #[error("store responded with status {status}: {body}")]
    Status { status: u16, body: String },
    /// A row returned by the store violates a domain constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
