//! `fm-inference` — delegate the migrate / don't-migrate question to a
//! remote model.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`features`] | `FeatureVector` (in memory), `WireFeatures` (JSON payload) |
//! | [`advisor`]  | `MigrationAdvisor` trait                                   |
//! | [`client`]   | `HttpAdvisor` — blocking `reqwest` client                  |
//! | [`config`]   | `InferenceConfig` (defaults, environment overrides)        |
//! | [`error`]    | `InferenceError`, `InferenceResult<T>`                     |
//! | [`testing`]  | one-shot HTTP stub (feature `testing`)                     |
//!
//! # Protocol
//!
//! One `POST` of a JSON object with nine PascalCase fields per call.  The
//! service answers `{"shouldMigrate": <bool>}`.  Any other outcome (a status
//! other than 200, unreadable body, missing or non-boolean field, timeout) is an
//! error; callers decide what an error means for the verdict.

pub mod advisor;
pub mod client;
pub mod config;
pub mod error;
pub mod features;
#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use advisor::MigrationAdvisor;
pub use client::HttpAdvisor;
pub use config::{ENV_TIMEOUT_MS, ENV_URL, InferenceConfig};
pub use error::{InferenceError, InferenceResult};
pub use features::{FeatureVector, WireFeatures};
