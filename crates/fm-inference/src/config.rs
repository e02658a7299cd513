//! Client settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{InferenceError, InferenceResult};

pub const ENV_URL: &str = "FOGMIG_INFERENCE_URL";
pub const ENV_TIMEOUT_MS: &str = "FOGMIG_INFERENCE_TIMEOUT_MS";

const DEFAULT_URL: &str = "http://127.0.0.1:8000/should_migrate";
const DEFAULT_TIMEOUT_MS: u64 = 2_000;

/// Where the decision service lives and how long to wait for it.
///
/// `timeout` bounds the whole request, connect included.  It is never
/// unlimited: a zero timeout is rejected when the client is built.
///
/// Serialized as `{"endpoint": "...", "timeout_ms": 2000}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub endpoint: String,
    #[serde(rename = "timeout_ms", with = "millis")]
    pub timeout:  Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_URL.to_owned(),
            timeout:  Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl InferenceConfig {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self { endpoint: endpoint.into(), timeout }
    }

    /// Defaults overridden by `FOGMIG_INFERENCE_URL` and
    /// `FOGMIG_INFERENCE_TIMEOUT_MS` when set.
    ///
    /// # Errors
    ///
    /// [`InferenceError::Config`] if the timeout is not a positive integer.
    pub fn from_env() -> InferenceResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> InferenceResult<Self> {
        let endpoint = lookup(ENV_URL).unwrap_or_else(|| DEFAULT_URL.to_owned());

        let timeout_ms: u64 = match lookup(ENV_TIMEOUT_MS) {
            None => DEFAULT_TIMEOUT_MS,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| InferenceError::Config(format!("invalid {ENV_TIMEOUT_MS}: {e}")))?,
        };
        if timeout_ms == 0 {
            return Err(InferenceError::Config(format!("{ENV_TIMEOUT_MS} must be positive")));
        }

        Ok(Self { endpoint, timeout: Duration::from_millis(timeout_ms) })
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
