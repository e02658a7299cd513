//! Device movement between decisions.

use fm_core::Coordinate;
use fm_topology::MobileDevice;

/// Moves a device forward by one tick.
///
/// Implementations may change position and heading; speed and attachment
/// are left to the driver.
pub trait MobilityModel: Send + Sync + 'static {
    fn advance(&self, device: &mut MobileDevice, dt_secs: f64);
}

/// Straight-line motion at constant speed.
///
/// With `bounds` set, a device that would leave the rectangle is clamped to
/// the edge and its heading mirrored, so it bounces back.
#[derive(Clone, Debug, Default)]
pub struct LinearMobility {
    pub bounds: Option<(Coordinate, Coordinate)>,
}

impl LinearMobility {
    pub fn bounded(min: Coordinate, max: Coordinate) -> Self {
        Self { bounds: Some((min, max)) }
    }
}

impl MobilityModel for LinearMobility {
    fn advance(&self, device: &mut MobileDevice, dt_secs: f64) {
        if device.is_stationary() {
            return;
        }
        let mut next = device.coord.advance(device.direction, device.speed * dt_secs);

        if let Some((min, max)) = self.bounds {
            let mut heading = device.direction;
            if next.x < min.x || next.x > max.x {
                next.x = next.x.clamp(min.x, max.x);
                heading = 180.0 - heading;
            }
            if next.y < min.y || next.y > max.y {
                next.y = next.y.clamp(min.y, max.y);
                heading = -heading;
            }
            device.direction = fm_core::normalize_deg(heading);
        }

        device.coord = next;
    }
}
