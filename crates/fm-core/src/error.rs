//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they need it.

use thiserror::Error;

/// Errors raised while validating core values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

/// Shorthand result type for `fm-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Reject NaN and infinities in values that feed distance arithmetic.
pub fn ensure_finite(what: &'static str, value: f64) -> CoreResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::NonFinite { what, value })
    }
}
