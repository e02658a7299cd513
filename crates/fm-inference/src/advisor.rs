//! The remote-decision seam.

use crate::{FeatureVector, InferenceResult};

/// Answers "should this device migrate now?" from a feature snapshot.
///
/// Implementations must bound their own latency.  A policy calls `advise`
/// at most once per device per tick and treats every `Err` as "no".
pub trait MigrationAdvisor: Send + Sync + 'static {
    fn advise(&self, features: &FeatureVector) -> InferenceResult<bool>;

    /// Short label for logs.
    fn name(&self) -> &str {
        "advisor"
    }
}

impl<T: MigrationAdvisor + ?Sized> MigrationAdvisor for Box<T> {
    fn advise(&self, features: &FeatureVector) -> InferenceResult<bool> {
        (**self).advise(features)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
