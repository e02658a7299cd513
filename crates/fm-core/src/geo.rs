//! Planar coordinates and heading arithmetic.
//!
//! The fog topology lives on a flat plane measured in arbitrary distance
//! units, so plain Euclidean distance is exact and symmetric.  Angles are in
//! **degrees**, counter-clockwise from the +x axis, normalised into
//! `[0, 360)`.  Device headings, migration-point angles, and the `Direction`
//! feature sent to the inference service all use this convention.

/// An `(x, y)` position on the simulation plane.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Coordinate) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Bearing from `self` towards `other`, in degrees.
    ///
    /// Returns `None` when the two points coincide, because no direction is
    /// defined between them.
    pub fn bearing_to(self, other: Coordinate) -> Option<f64> {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(normalize_deg(dy.atan2(dx).to_degrees()))
    }

    /// The point reached after moving `dist` units along `heading_deg`.
    pub fn advance(self, heading_deg: f64, dist: f64) -> Coordinate {
        let rad = heading_deg.to_radians();
        Coordinate {
            x: self.x + dist * rad.cos(),
            y: self.y + dist * rad.sin(),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Wrap any angle into `[0, 360)`.
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two headings, in `[0, 180]`.
#[inline]
pub fn angle_between_deg(a: f64, b: f64) -> f64 {
    let diff = normalize_deg(a - b);
    if diff > 180.0 { 360.0 - diff } else { diff }
}
