//! The nine features sent to the decision service.

use serde::{Deserialize, Serialize};

/// Wire value standing in for an absent distance.
pub const ABSENT_DISTANCE: f64 = -1.0;

/// Snapshot of one device at decision time.
///
/// Distances that cannot be computed (no local server, no other server) are
/// `None` here; the `-1` sentinel only exists in [`WireFeatures`].
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector {
    pub pos_x:     f64,
    pub pos_y:     f64,
    /// Heading in degrees, `[0, 360)`.
    pub direction: f64,
    pub speed:     f64,
    pub distance_to_source_ap:      f64,
    pub distance_to_local_server:   Option<f64>,
    pub distance_to_closest_server: Option<f64>,
    pub is_mig_point: bool,
    pub is_mig_zone:  bool,
}

/// JSON body of an inference request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireFeatures {
    pub pos_x:                        f64,
    pub pos_y:                        f64,
    pub direction:                    f64,
    pub speed:                        f64,
    pub distance_to_source_ap:        f64,
    pub distance_to_local_cloudlet:   f64,
    pub distance_to_closest_cloudlet: f64,
    pub is_mig_point:                 bool,
    pub is_mig_zone:                  bool,
}

impl From<&FeatureVector> for WireFeatures {
    fn from(f: &FeatureVector) -> Self {
        Self {
            pos_x: f.pos_x,
            pos_y: f.pos_y,
            direction: f.direction,
            speed: f.speed,
            distance_to_source_ap: f.distance_to_source_ap,
            distance_to_local_cloudlet: f.distance_to_local_server.unwrap_or(ABSENT_DISTANCE),
            distance_to_closest_cloudlet: f.distance_to_closest_server.unwrap_or(ABSENT_DISTANCE),
            is_mig_point: f.is_mig_point,
            is_mig_zone: f.is_mig_zone,
        }
    }
}

/// JSON body of an inference response.
#[derive(Debug, Deserialize)]
pub(crate) struct WireVerdict {
    #[serde(rename = "shouldMigrate")]
    pub should_migrate: bool,
}
