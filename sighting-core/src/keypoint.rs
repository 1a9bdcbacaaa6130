use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Point2, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Allows the retrieval of the point on the image the observation came from.
pub trait ImagePoint {
    /// Retrieves the point on the image
    fn image_point(&self) -> Point2<f64>;
}

/// A point on an image frame in pixel coordinates.
///
/// The point is expected to already be free of lens distortion. X points right and Y points
/// down, with the origin at the top left corner of the image.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct KeyPoint(pub Point2<f64>);

impl KeyPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self(Point2::new(x, y))
    }

    /// Appends a `1.0` component to the pixel so it can be multiplied by an inverse intrinsic matrix.
    pub fn to_homogeneous(self) -> Vector3<f64> {
        self.0.coords.push(1.0)
    }
}

impl ImagePoint for KeyPoint {
    fn image_point(&self) -> Point2<f64> {
        self.0
    }
}

impl ImagePoint for Point2<f64> {
    fn image_point(&self) -> Point2<f64> {
        *self
    }
}

impl ImagePoint for (f64, f64) {
    fn image_point(&self) -> Point2<f64> {
        Point2::new(self.0, self.1)
    }
}

impl From<(f64, f64)> for KeyPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for KeyPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}
