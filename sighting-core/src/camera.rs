use crate::ImagePoint;
use nalgebra::{UnitVector3, Vector3};

/// Allows conversion between the point on an image and the direction out of the camera
/// along which the light that hit that pixel travelled.
pub trait CameraModel {
    /// Extracts an unnormalized direction from a pixel location in an image, in the camera's own frame.
    ///
    /// The direction's X axis points right, Y axis points down, and Z axis points forwards.
    /// The image point uses the same coordinate frame. Its Y is down and its X is right.
    fn direction<P>(&self, point: P) -> Vector3<f64>
    where
        P: ImagePoint;

    /// Extracts a unit bearing from a pixel location in an image, in the camera's own frame.
    fn bearing<P>(&self, point: P) -> UnitVector3<f64>
    where
        P: ImagePoint,
    {
        UnitVector3::new_normalize(self.direction(point))
    }
}
