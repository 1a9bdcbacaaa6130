//! This crate plugs into `sighting-core` and provides pinhole cameras whose orientation is recovered
//! from two calibration anchors.
//!
//! [`CameraIntrinsics`] converts image coordinates into directions in the camera's own frame.
//! [`CalibratedCamera`] adds an optical center and two [`CalibrationAnchor`]s and uses them to
//! rotate those directions into the shared world frame.
//!
//! Pixels are expected to be free of lens distortion by the time they reach this crate.

#![no_std]

mod anchor;
mod calibrated;

pub use anchor::*;
pub use calibrated::*;

use num_traits::Float;
use sighting_core::nalgebra::{Matrix3, Point2, Vector2, Vector3};
use sighting_core::{CameraModel, ImagePoint, KeyPoint, Result, SightingError};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Converts a pixel into a direction in the camera frame by multiplying `(x, y, 1)` with the
/// inverse of the intrinsic matrix.
///
/// The returned direction is not normalized. Fails with [`SightingError::SingularIntrinsics`] if
/// the matrix cannot be inverted. Prefer [`CameraIntrinsics`], which is validated once and does not
/// invert a matrix on every call.
///
/// ```
/// use sighting_core::{nalgebra::{Matrix3, Vector3}, KeyPoint};
/// use sighting_pinhole::pixel_to_direction;
///
/// let matrix = Matrix3::new(
///     1000.0, 0.0, 500.0,
///     0.0, 1000.0, 500.0,
///     0.0, 0.0, 1.0,
/// );
/// let direction = pixel_to_direction(KeyPoint::new(1500.0, 500.0), &matrix).unwrap();
/// assert!((direction - Vector3::new(1.0, 0.0, 1.0)).norm() < 1e-12);
/// ```
pub fn pixel_to_direction<P>(pixel: P, intrinsics: &Matrix3<f64>) -> Result<Vector3<f64>>
where
    P: ImagePoint,
{
    let inverse = intrinsics
        .try_inverse()
        .ok_or(SightingError::SingularIntrinsics {
            fx: intrinsics[(0, 0)],
            fy: intrinsics[(1, 1)],
        })?;
    Ok(inverse * pixel.image_point().coords.push(1.0))
}

/// This contains intrinsic camera parameters as per
/// [this Wikipedia page](https://en.wikipedia.org/wiki/Camera_resectioning#Intrinsic_parameters).
///
/// The intrinsics of a camera are fixed for its lifetime. Zooming the lens is not supported.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraIntrinsics {
    pub focals: Vector2<f64>,
    pub principal_point: Point2<f64>,
    #[cfg_attr(feature = "serde-serialize", serde(default))]
    pub skew: f64,
}

impl CameraIntrinsics {
    /// Creates camera intrinsics that would create an identity intrinsic matrix.
    /// This would imply that the pixel positions have an origin at `0,0`,
    /// the pixel distance unit is the focal length, pixels are square,
    /// and there is no skew.
    pub fn identity() -> Self {
        Self {
            focals: Vector2::new(1.0, 1.0),
            skew: 0.0,
            principal_point: Point2::new(0.0, 0.0),
        }
    }

    /// Creates intrinsics from the four parameters usually reported by a calibration tool.
    pub fn from_parameters(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self::identity()
            .focals(Vector2::new(fx, fy))
            .principal_point(Point2::new(cx, cy))
    }

    pub fn focals(self, focals: Vector2<f64>) -> Self {
        Self { focals, ..self }
    }

    pub fn focal(self, focal: f64) -> Self {
        Self {
            focals: Vector2::new(focal, focal),
            ..self
        }
    }

    pub fn principal_point(self, principal_point: Point2<f64>) -> Self {
        Self {
            principal_point,
            ..self
        }
    }

    pub fn skew(self, skew: f64) -> Self {
        Self { skew, ..self }
    }

    #[rustfmt::skip]
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.focals.x,  self.skew,      self.principal_point.x,
            0.0,            self.focals.y,  self.principal_point.y,
            0.0,            0.0,            1.0,
        )
    }

    /// Checks that the intrinsic matrix is invertible and all its entries are finite.
    ///
    /// ```
    /// use sighting_core::SightingError;
    /// use sighting_pinhole::CameraIntrinsics;
    ///
    /// assert!(CameraIntrinsics::from_parameters(800.0, 800.0, 320.0, 240.0).validate().is_ok());
    /// assert_eq!(
    ///     CameraIntrinsics::from_parameters(0.0, 800.0, 320.0, 240.0).validate(),
    ///     Err(SightingError::SingularIntrinsics { fx: 0.0, fy: 800.0 }),
    /// );
    /// ```
    pub fn validate(&self) -> Result<()> {
        let invertible = [self.focals.x, self.focals.y]
            .iter()
            .all(|&focal| focal.is_finite() && Float::abs(focal) > f64::EPSILON);
        let finite = self.skew.is_finite()
            && self.principal_point.coords.iter().all(|c| c.is_finite());
        if invertible && finite {
            Ok(())
        } else {
            Err(SightingError::SingularIntrinsics {
                fx: self.focals.x,
                fy: self.focals.y,
            })
        }
    }
}

impl CameraModel for CameraIntrinsics {
    /// Takes in a point from an image in pixel coordinates and converts it to a direction on the
    /// virtual image plane at depth `1.0`.
    ///
    /// ```
    /// use sighting_core::{CameraModel, KeyPoint};
    /// use sighting_pinhole::CameraIntrinsics;
    /// use sighting_core::nalgebra::{Vector2, Point2};
    /// let intrinsics = CameraIntrinsics {
    ///     focals: Vector2::new(800.0, 900.0),
    ///     principal_point: Point2::new(500.0, 600.0),
    ///     skew: 1.7,
    /// };
    /// let kp = KeyPoint(Point2::new(471.0, 322.0));
    /// let direction = intrinsics.direction(kp);
    /// let distance = (kp.to_homogeneous() - intrinsics.matrix() * direction).norm();
    /// assert!(distance < 1e-9);
    /// ```
    fn direction<P>(&self, point: P) -> Vector3<f64>
    where
        P: ImagePoint,
    {
        let centered = point.image_point() - self.principal_point;
        let y = centered.y / self.focals.y;
        let x = (centered.x - self.skew * y) / self.focals.x;
        Vector3::new(x, y, 1.0)
    }
}

impl CameraIntrinsics {
    /// Converts a camera frame direction back into pixel coordinates.
    ///
    /// Returns `None` when the direction does not point in front of the camera.
    ///
    /// ```
    /// use sighting_core::{CameraModel, KeyPoint};
    /// use sighting_pinhole::CameraIntrinsics;
    ///
    /// let intrinsics = CameraIntrinsics::from_parameters(800.0, 900.0, 500.0, 600.0).skew(1.7);
    /// let kp = KeyPoint::new(471.0, 322.0);
    /// let projected = intrinsics.project(intrinsics.bearing(kp).into_inner()).unwrap();
    /// assert!((kp.0 - projected.0).norm() < 1e-6);
    /// ```
    pub fn project(&self, direction: Vector3<f64>) -> Option<KeyPoint> {
        if !(direction.z > 0.0) {
            return None;
        }
        let x = direction.x / direction.z;
        let y = direction.y / direction.z;
        Some(KeyPoint::new(
            x * self.focals.x + self.skew * y + self.principal_point.x,
            y * self.focals.y + self.principal_point.y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn closed_form_matches_matrix_inverse() {
        let intrinsics = CameraIntrinsics::from_parameters(1000.0, 950.0, 512.0, 384.0).skew(0.4);
        for pixel in [
            KeyPoint::new(0.0, 0.0),
            KeyPoint::new(512.0, 384.0),
            KeyPoint::new(1023.0, 12.5),
            KeyPoint::new(-40.0, 900.0),
        ] {
            let expected = pixel_to_direction(pixel, &intrinsics.matrix()).unwrap();
            assert_relative_eq!(intrinsics.direction(pixel), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn principal_point_looks_forward() {
        let intrinsics = CameraIntrinsics::from_parameters(1000.0, 1000.0, 500.0, 500.0);
        assert_relative_eq!(
            intrinsics.bearing(KeyPoint::new(500.0, 500.0)).into_inner(),
            Vector3::z(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let intrinsics = CameraIntrinsics::from_parameters(1000.0, 0.0, 500.0, 500.0);
        assert_eq!(
            pixel_to_direction(KeyPoint::new(1.0, 2.0), &intrinsics.matrix()),
            Err(SightingError::SingularIntrinsics {
                fx: 1000.0,
                fy: 0.0
            })
        );
        assert!(intrinsics.validate().is_err());
    }

    #[test]
    fn non_finite_skew_is_rejected() {
        let intrinsics = CameraIntrinsics::identity()
            .focal(1000.0)
            .principal_point(Point2::new(500.0, 500.0));
        assert!(intrinsics.validate().is_ok());
        assert_eq!(
            intrinsics.skew(f64::NAN).validate(),
            Err(SightingError::SingularIntrinsics {
                fx: 1000.0,
                fy: 1000.0
            })
        );
        assert!(intrinsics.skew(f64::INFINITY).validate().is_err());
    }

    #[cfg(feature = "serde-serialize")]
    #[test]
    fn intrinsics_serde_round_trip() {
        let intrinsics = CameraIntrinsics::from_parameters(1000.0, 950.0, 512.0, 384.0).skew(0.4);
        let json = serde_json::to_string(&intrinsics).unwrap();
        let restored: CameraIntrinsics = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, intrinsics);
    }

    #[cfg(feature = "serde-serialize")]
    #[test]
    fn missing_skew_defaults_to_zero() {
        let intrinsics: CameraIntrinsics =
            serde_json::from_str(r#"{ "focals": [1000.0, 950.0], "principal_point": [512.0, 384.0] }"#)
                .unwrap();
        assert_eq!(
            intrinsics,
            CameraIntrinsics::from_parameters(1000.0, 950.0, 512.0, 384.0)
        );
        assert_eq!(intrinsics.skew, 0.0);
    }

    #[test]
    fn behind_camera_does_not_project() {
        let intrinsics = CameraIntrinsics::from_parameters(1000.0, 1000.0, 500.0, 500.0);
        assert_eq!(intrinsics.project(Vector3::new(0.0, 0.0, -1.0)), None);
        assert_eq!(intrinsics.project(Vector3::x()), None);
    }
}
