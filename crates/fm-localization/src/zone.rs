//! Migration zone and migration point detection.

use fm_core::angle_between_deg;
use fm_topology::{ApDevice, MigPointPolicy, MobileDevice};

use crate::{PositionCode, classify_position};

/// Angles within this many degrees of each other count as "the same side".
const HALF_PLANE_DEG: f64 = 90.0;

/// Tunables for the migration-point shapes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocalizationParams {
    /// `Heading`/`Outbound`: maximum deviation between the device heading and
    /// the zone's migration-point angle.
    pub angle_tolerance_deg: f64,
    /// `Boundary`: width of the band inside the zone edge that counts as the
    /// migration point.
    pub boundary_margin: f64,
}

impl Default for LocalizationParams {
    fn default() -> Self {
        Self { angle_tolerance_deg: 45.0, boundary_margin: 2.0 }
    }
}

/// Refresh `device.in_migration_zone` and `device.at_migration_point`
/// against `ap`.
///
/// `code` must be the result of [`classify_position`] for the same pair.
/// A device outside the zone is never at a migration point.  A stationary
/// device keeps its last heading.
pub fn update_zone_and_point(
    device: &mut MobileDevice,
    ap:     &ApDevice,
    code:   PositionCode,
    params: &LocalizationParams,
) {
    let dist = ap.coord.distance(device.coord);
    let in_zone = dist <= ap.zone.radius;

    let heading_ok = || {
        angle_between_deg(device.direction, ap.zone.point_angle_deg) <= params.angle_tolerance_deg
    };

    let at_point = in_zone
        && match device.mig_point_policy {
            MigPointPolicy::Heading => heading_ok(),
            MigPointPolicy::Outbound => {
                heading_ok()
                    && match ap.coord.bearing_to(device.coord) {
                        None => code == PositionCode::Same,
                        Some(b) => angle_between_deg(b, ap.zone.point_angle_deg) <= HALF_PLANE_DEG,
                    }
            }
            MigPointPolicy::Boundary => {
                dist >= ap.zone.radius - params.boundary_margin
                    && ap
                        .coord
                        .bearing_to(device.coord)
                        .is_some_and(|b| angle_between_deg(device.direction, b) <= HALF_PLANE_DEG)
            }
        };

    device.in_migration_zone = in_zone;
    device.at_migration_point = at_point;
}

/// Classify `device` against `ap` and refresh its flags in one step.
pub fn localize(device: &mut MobileDevice, ap: &ApDevice, params: &LocalizationParams) -> PositionCode {
    let code = classify_position(ap.coord, device.coord);
    update_zone_and_point(device, ap, code, params);
    code
}
