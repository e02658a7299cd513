//! Migration-zone geometry attached to every access point, and the
//! per-device migration-point policy selector.

use std::fmt;
use std::str::FromStr;

use crate::TopologyError;

/// The region around an AP inside which migration eligibility is evaluated.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MigrationZone {
    /// Distance from the AP within which a device is "in the zone".
    pub radius: f64,
    /// Direction (degrees) in which the migration point lies, seen from the AP.
    pub point_angle_deg: f64,
}

impl MigrationZone {
    pub fn new(radius: f64, point_angle_deg: f64) -> Self {
        Self { radius, point_angle_deg }
    }
}

/// Which shape decides whether a device stands at a migration point.
///
/// Configured per device as a small integer code (see [`code`](Self::code)).
/// The localization crate owns the geometry behind each variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MigPointPolicy {
    /// Heading lines up with the zone's migration-point angle.
    #[default]
    Heading,
    /// `Heading`, and the device sits on the migration-point side of the AP.
    Outbound,
    /// Near the zone edge and moving away from the AP.
    Boundary,
}

impl MigPointPolicy {
    pub const ALL: [MigPointPolicy; 3] =
        [MigPointPolicy::Heading, MigPointPolicy::Outbound, MigPointPolicy::Boundary];

    pub fn code(self) -> u8 {
        match self {
            MigPointPolicy::Heading  => 0,
            MigPointPolicy::Outbound => 1,
            MigPointPolicy::Boundary => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }
}

impl fmt::Display for MigPointPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MigPointPolicy::Heading  => "heading",
            MigPointPolicy::Outbound => "outbound",
            MigPointPolicy::Boundary => "boundary",
        };
        f.write_str(name)
    }
}

impl FromStr for MigPointPolicy {
    type Err = TopologyError;

    /// Accepts either the lowercase name or the integer code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code)
                .ok_or_else(|| TopologyError::Parse(format!("unknown migration-point policy code {code}")));
        }
        Self::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| TopologyError::Parse(format!("unknown migration-point policy {s:?}")))
    }
}
