use thiserror::Error;

/// Failure taxonomy for the query path and the collaborator seams.
///
/// A missing row (e.g. no reference sample for a volatility check) is not
/// an error state and is modelled as `Option`, never as a variant here.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("storage failure: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Upstream(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
