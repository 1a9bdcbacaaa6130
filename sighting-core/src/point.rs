use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A point in the shared world frame.
///
/// The world frame is any consistent right-handed Cartesian frame both cameras are placed in.
/// Typically this is a local East-North-Up tangent plane whose origin is the first camera, with
/// distances in meters. Conversion from geodetic coordinates happens before points reach this crate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct WorldPoint(pub Point3<f64>);

impl WorldPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Point3::new(x, y, z))
    }

    /// The origin of the world frame.
    pub fn origin() -> Self {
        Self(Point3::origin())
    }

    /// The midpoint between `self` and `other`.
    pub fn midpoint(self, other: Self) -> Self {
        Self(nalgebra::center(&self.0, &other.0))
    }

    /// Euclidean distance between two world points.
    pub fn distance(self, other: Self) -> f64 {
        nalgebra::distance(&self.0, &other.0)
    }

    /// Retrieves the vector pointing from `from` to `self`.
    pub fn relative_to(self, from: Self) -> Vector3<f64> {
        self.0 - from.0
    }
}

impl From<[f64; 3]> for WorldPoint {
    fn from(coords: [f64; 3]) -> Self {
        Self(coords.into())
    }
}

impl From<Vector3<f64>> for WorldPoint {
    fn from(coords: Vector3<f64>) -> Self {
        Self(coords.into())
    }
}

/// A half line out of an optical center in the world frame.
///
/// The direction is not required to be unit length. Camera rotations derived from two anchors
/// are not guaranteed to be orthonormal, so directions rotated into the world frame are only
/// approximately unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Ray {
    pub origin: WorldPoint,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    /// The point reached after travelling `t` times the direction from the origin.
    pub fn at(&self, t: f64) -> WorldPoint {
        WorldPoint(self.origin.0 + self.direction * t)
    }
}
