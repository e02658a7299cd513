//! Compass-octant classification.

use std::fmt;

use fm_core::Coordinate;

/// Octant of a device relative to an AP, seen from the AP.
///
/// Octants are 45° wide and centred on the compass directions, so `E`
/// covers bearings in `[337.5, 22.5)`.  Boundaries belong to the octant
/// counter-clockwise of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionCode {
    /// Device and AP coincide.
    Same,
    E,
    NE,
    N,
    NW,
    W,
    SW,
    S,
    SE,
}

impl PositionCode {
    /// Octants in counter-clockwise order starting at east.
    pub const OCTANTS: [PositionCode; 8] = [
        PositionCode::E,
        PositionCode::NE,
        PositionCode::N,
        PositionCode::NW,
        PositionCode::W,
        PositionCode::SW,
        PositionCode::S,
        PositionCode::SE,
    ];

    /// Integer form: `0` for `Same`, `1..=8` for `E` through `SE`.
    pub fn code(self) -> u8 {
        match self {
            PositionCode::Same => 0,
            other => Self::OCTANTS
                .iter()
                .position(|&o| o == other)
                .map_or(0, |i| i as u8 + 1),
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PositionCode::Same),
            1..=8 => Some(Self::OCTANTS[code as usize - 1]),
            _ => None,
        }
    }

    /// Centre bearing of the octant; `None` for `Same`.
    pub fn center_deg(self) -> Option<f64> {
        match self {
            PositionCode::Same => None,
            other => Some((other.code() - 1) as f64 * 45.0),
        }
    }
}

impl fmt::Display for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PositionCode::Same => "same",
            PositionCode::E => "E",
            PositionCode::NE => "NE",
            PositionCode::N => "N",
            PositionCode::NW => "NW",
            PositionCode::W => "W",
            PositionCode::SW => "SW",
            PositionCode::S => "S",
            PositionCode::SE => "SE",
        };
        f.write_str(s)
    }
}

/// Which octant `device` occupies relative to `ap`.
pub fn classify_position(ap: Coordinate, device: Coordinate) -> PositionCode {
    match ap.bearing_to(device) {
        None => PositionCode::Same,
        Some(bearing) => {
            let sector = ((bearing + 22.5) / 45.0).floor() as usize % 8;
            PositionCode::OCTANTS[sector]
        }
    }
}
