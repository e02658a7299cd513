use thiserror::Error;

use fm_inference::InferenceError;

/// Construction-time failures.  Evaluations themselves never fail; they
/// return `false` with a [`DecisionReason`](crate::DecisionReason).
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("unknown policy {0:?}")]
    UnknownPolicy(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
