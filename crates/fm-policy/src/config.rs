//! Tunables for the whole decision pipeline.

use fm_inference::InferenceConfig;
use fm_localization::LocalizationParams;
use fm_select::{DistanceLoadCost, SelectorParams};

/// Every knob a [`MigrationEngine`](crate::MigrationEngine) reads.
///
/// With the `serde` feature this deserializes from JSON; missing sections
/// fall back to their defaults.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MigrationConfig {
    pub localization: LocalizationParams,
    pub selector:     SelectorParams,
    pub cost:         DistanceLoadCost,
    pub inference:    InferenceConfig,
}
