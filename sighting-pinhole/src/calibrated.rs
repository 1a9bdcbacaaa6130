use crate::{CalibrationAnchor, CameraIntrinsics};
use sighting_core::{
    nalgebra::{Matrix3, UnitVector3, Vector3},
    AnchorIndex, CameraModel, Frame, ImagePoint, KeyPoint, Ray, Result, SightingError, WorldPoint,
};
use sighting_geom::{orthonormality_error, TwoVectorAttitude};

/// Derived rotations above this [`orthonormality_error`] are reported with a warning.
pub const ORTHONORMALITY_WARNING: f64 = 1e-2;

/// A pinhole camera at a fixed world position whose orientation is recovered from two anchors.
///
/// The camera-to-world rotation is derived state. It is computed eagerly at construction and after
/// every [`update_anchor`](Self::update_anchor), so turning a pixel into a world direction is a
/// pure read.
///
/// An update either fully succeeds or leaves the camera untouched. Wrapping a camera in a lock
/// (or swapping whole cameras) is enough to share it between threads without ever exposing a
/// rotation derived from one old anchor and one new anchor.
///
/// ```
/// use sighting_core::{KeyPoint, WorldPoint};
/// use sighting_pinhole::{CalibratedCamera, CalibrationAnchor, CameraIntrinsics};
///
/// let camera = CalibratedCamera::new(
///     CameraIntrinsics::from_parameters(1000.0, 1000.0, 500.0, 500.0),
///     WorldPoint::origin(),
///     [
///         CalibrationAnchor::new([1.0, 0.0, 0.0], [1500.0, 500.0]),
///         CalibrationAnchor::new([0.0, 1.0, 0.0], [500.0, 1500.0]),
///     ],
/// )
/// .unwrap();
/// let direction = camera.direction_in_world(KeyPoint::new(1500.0, 500.0));
/// assert!((direction - sighting_core::nalgebra::Vector3::x()).norm() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CalibratedCamera {
    intrinsics: CameraIntrinsics,
    optical_center: WorldPoint,
    anchors: [CalibrationAnchor; 2],
    attitude: TwoVectorAttitude,
    world_directions: [UnitVector3<f64>; 2],
    orientation: Orientation,
}

/// Everything derived from the anchor pixels, replaced as a whole.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Orientation {
    camera_directions: [UnitVector3<f64>; 2],
    camera_to_world: Matrix3<f64>,
    world_to_camera: Matrix3<f64>,
}

impl CalibratedCamera {
    /// Creates a camera at `optical_center` oriented by the two `anchors`.
    ///
    /// Fails with [`SightingError::SingularIntrinsics`] if the intrinsics cannot be inverted and with
    /// [`SightingError::SingularBasis`] if the anchors are collinear as seen from the camera.
    pub fn new(
        intrinsics: CameraIntrinsics,
        optical_center: WorldPoint,
        anchors: [CalibrationAnchor; 2],
    ) -> Result<Self> {
        Self::with_attitude(
            intrinsics,
            optical_center,
            anchors,
            TwoVectorAttitude::default(),
        )
    }

    /// Same as [`CalibratedCamera::new`], but with a custom attitude solver tolerance.
    pub fn with_attitude(
        intrinsics: CameraIntrinsics,
        optical_center: WorldPoint,
        anchors: [CalibrationAnchor; 2],
        attitude: TwoVectorAttitude,
    ) -> Result<Self> {
        intrinsics.validate()?;
        let world_directions = [
            world_direction(optical_center, anchors[0].world)?,
            world_direction(optical_center, anchors[1].world)?,
        ];
        let camera_directions = [
            intrinsics.bearing(anchors[0].pixel),
            intrinsics.bearing(anchors[1].pixel),
        ];
        let orientation = orient(&attitude, camera_directions, world_directions)?;
        log::debug!(
            "calibrated camera at {:?} from anchor pixels {:?} and {:?}",
            optical_center.0,
            anchors[0].pixel.0,
            anchors[1].pixel.0
        );
        warn_if_distorted(&orientation.camera_to_world);
        Ok(Self {
            intrinsics,
            optical_center,
            anchors,
            attitude,
            world_directions,
            orientation,
        })
    }

    /// Replaces the pixel of one anchor and recomputes the camera-to-world rotation.
    ///
    /// The world position of the anchor stays fixed. If the new pixel makes the anchors collinear
    /// as seen from the camera, [`SightingError::SingularBasis`] is returned and the camera keeps its
    /// previous anchors and rotation.
    pub fn update_anchor(&mut self, index: AnchorIndex, pixel: impl Into<KeyPoint>) -> Result<()> {
        let pixel = pixel.into();
        let mut camera_directions = self.orientation.camera_directions;
        camera_directions[index.index()] = self.intrinsics.bearing(pixel);
        let orientation = orient(&self.attitude, camera_directions, self.world_directions)?;

        log::debug!(
            "recalibrated {:?} anchor of camera at {:?} to pixel {:?}",
            index,
            self.optical_center.0,
            pixel.0
        );
        warn_if_distorted(&orientation.camera_to_world);
        self.anchors[index.index()].pixel = pixel;
        self.orientation = orientation;
        Ok(())
    }

    /// Converts a pixel into a direction in the world frame.
    ///
    /// The camera-frame direction is normalized before it is rotated. Since the rotation is not
    /// guaranteed to be orthonormal, the result is only approximately unit length.
    pub fn direction_in_world<P>(&self, pixel: P) -> Vector3<f64>
    where
        P: ImagePoint,
    {
        self.orientation.camera_to_world * self.intrinsics.bearing(pixel).into_inner()
    }

    /// The world frame ray out of the optical center through `pixel`.
    pub fn ray<P>(&self, pixel: P) -> Ray
    where
        P: ImagePoint,
    {
        Ray::new(self.optical_center, self.direction_in_world(pixel))
    }

    /// The pixel at which a world point appears.
    ///
    /// Returns `None` if the point is behind the camera.
    pub fn project(&self, point: WorldPoint) -> Option<KeyPoint> {
        self.intrinsics
            .project(self.orientation.world_to_camera * point.relative_to(self.optical_center))
    }

    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    pub fn optical_center(&self) -> WorldPoint {
        self.optical_center
    }

    pub fn anchor(&self, index: AnchorIndex) -> &CalibrationAnchor {
        &self.anchors[index.index()]
    }

    pub fn anchors(&self) -> &[CalibrationAnchor; 2] {
        &self.anchors
    }

    /// The unit direction from the optical center to an anchor in the world frame.
    pub fn anchor_world_direction(&self, index: AnchorIndex) -> UnitVector3<f64> {
        self.world_directions[index.index()]
    }

    pub fn rotation_cam_to_world(&self) -> &Matrix3<f64> {
        &self.orientation.camera_to_world
    }

    /// How far the derived rotation is from orthonormal. See [`orthonormality_error`].
    ///
    /// Anchors whose angular separation differs between the image and the world give a non-zero
    /// value. This error is not corrected and shows up as scale or shear in world directions.
    pub fn orthonormality_error(&self) -> f64 {
        orthonormality_error(&self.orientation.camera_to_world)
    }
}

fn world_direction(optical_center: WorldPoint, anchor: WorldPoint) -> Result<UnitVector3<f64>> {
    UnitVector3::try_new(anchor.relative_to(optical_center), 0.0).ok_or(
        SightingError::SingularBasis {
            frame: Frame::Target,
        },
    )
}

fn orient(
    attitude: &TwoVectorAttitude,
    camera_directions: [UnitVector3<f64>; 2],
    world_directions: [UnitVector3<f64>; 2],
) -> Result<Orientation> {
    let camera_to_world = attitude.solve(
        camera_directions[0].into_inner(),
        camera_directions[1].into_inner(),
        world_directions[0].into_inner(),
        world_directions[1].into_inner(),
    )?;
    let world_to_camera =
        camera_to_world
            .try_inverse()
            .ok_or(SightingError::SingularBasis {
                frame: Frame::Target,
            })?;
    Ok(Orientation {
        camera_directions,
        camera_to_world,
        world_to_camera,
    })
}

fn warn_if_distorted(camera_to_world: &Matrix3<f64>) {
    let error = orthonormality_error(camera_to_world);
    if error > ORTHONORMALITY_WARNING {
        log::warn!(
            "camera rotation deviates from orthonormal by {}, anchor angles disagree between image and world",
            error
        );
    }
}
