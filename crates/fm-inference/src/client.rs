//! Blocking HTTP implementation of [`MigrationAdvisor`].

use reqwest::StatusCode;
use tracing::debug;

use crate::features::WireVerdict;
use crate::{FeatureVector, InferenceConfig, InferenceError, InferenceResult, MigrationAdvisor, WireFeatures};

/// Sends one JSON `POST` per call; no retries.
///
/// Built once and shared: `reqwest::blocking::Client` pools connections
/// internally.  Must not be constructed or used from inside an async
/// runtime.
#[derive(Debug)]
pub struct HttpAdvisor {
    client:   reqwest::blocking::Client,
    endpoint: String,
}

impl HttpAdvisor {
    /// # Errors
    ///
    /// [`InferenceError::Config`] for a zero timeout;
    /// [`InferenceError::Client`] if the TLS backend fails to initialise.
    pub fn new(config: &InferenceConfig) -> InferenceResult<Self> {
        if config.timeout.is_zero() {
            return Err(InferenceError::Config("timeout must be positive".to_owned()));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(InferenceError::Client)?;
        Ok(Self { client, endpoint: config.endpoint.clone() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl MigrationAdvisor for HttpAdvisor {
    fn advise(&self, features: &FeatureVector) -> InferenceResult<bool> {
        let body = WireFeatures::from(features);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(InferenceError::from_reqwest)?;

        // Only 200 carries a verdict; other 2xx codes are not part of the protocol.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(InferenceError::Status(status.as_u16()));
        }

        let text = response.text().map_err(InferenceError::from_reqwest)?;
        let verdict: WireVerdict =
            serde_json::from_str(&text).map_err(|e| InferenceError::Malformed(e.to_string()))?;

        debug!(endpoint = %self.endpoint, should_migrate = verdict.should_migrate, "inference verdict");
        Ok(verdict.should_migrate)
    }

    fn name(&self) -> &str {
        "http"
    }
}
