use state::StoreError;
use thiserror::Error;

pub const PRECONDITION_FAILED_MESSAGE: &str = "missing or malformed request body";
pub const INTERNAL_ERROR_PREFIX: &str = "cannot proceed with the request error: ";

/// How a failed submission is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request is missing its path parameter or body.
    PreconditionFailed,
    InternalError,
}

impl FailureKind {
    pub fn status_code(&self) -> i64 {
        match self {
            FailureKind::PreconditionFailed => 412,
            FailureKind::InternalError => 500,
        }
    }
}

/// Problems with the content of a request body.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Input request is malformed or missing parameters, details license cannot be empty")]
    MissingLicense,
    #[error("Input request is malformed or missing parameters, details {0}")]
    MalformedBody(serde_json::Error),
    #[error("Input request is malformed or missing parameters, details body must be a JSON object")]
    NotAnObject,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{}", PRECONDITION_FAILED_MESSAGE)]
    PreconditionFailed,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("cannot serialize response, {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SubmissionError {
    // Body validation failures surface as internal errors for existing clients
    pub fn kind(&self) -> FailureKind {
        match self {
            SubmissionError::PreconditionFailed => FailureKind::PreconditionFailed,
            SubmissionError::Validation(_)
            | SubmissionError::Store(_)
            | SubmissionError::Serialization(_) => FailureKind::InternalError,
        }
    }

    /// Message returned to the caller in the response body.
    pub fn message(&self) -> String {
        match self.kind() {
            FailureKind::PreconditionFailed => self.to_string(),
            FailureKind::InternalError => format!("{INTERNAL_ERROR_PREFIX}{self}"),
        }
    }
}
