use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("inference request timed out")]
    Timeout,

    #[error("inference service returned HTTP {0}")]
    Status(u16),

    #[error("malformed inference response: {0}")]
    Malformed(String),

    #[error("inference configuration error: {0}")]
    Config(String),
}

impl InferenceError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            InferenceError::Timeout
        } else {
            InferenceError::Transport(e)
        }
    }
}

pub type InferenceResult<T> = Result<T, InferenceError>;
