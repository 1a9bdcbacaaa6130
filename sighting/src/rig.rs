use sighting_core::{
    AnchorIndex, ImagePoint, KeyPoint, Result, Sighting, TriangulatorRays, WorldPoint,
};
use sighting_geom::MidpointTriangulator;
use sighting_pinhole::CalibratedCamera;

/// Selects one of the two cameras of a [`Triangulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CameraIndex {
    First,
    Second,
}

impl CameraIndex {
    pub const ALL: [CameraIndex; 2] = [CameraIndex::First, CameraIndex::Second];

    pub fn index(self) -> usize {
        match self {
            CameraIndex::First => 0,
            CameraIndex::Second => 1,
        }
    }
}

/// Two fixed cameras observing the same scene.
///
/// The triangulator exclusively owns both cameras. Each camera carries its own world position, so
/// the first camera is conventionally placed at the world origin and the second one wherever it
/// sits relative to it. Calibration is the only state that changes over the lifetime of a
/// triangulator, and only through [`Triangulator::update_anchor`].
///
/// The ray triangulation algorithm is a type parameter and defaults to the midpoint of the
/// closest-approach segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulator<T = MidpointTriangulator> {
    cameras: [CalibratedCamera; 2],
    triangulator: T,
}

impl Triangulator {
    /// Creates a rig from two calibrated cameras.
    pub fn new(first: CalibratedCamera, second: CalibratedCamera) -> Self {
        Self::with_triangulator(first, second, MidpointTriangulator::new())
    }
}

impl<T> Triangulator<T>
where
    T: TriangulatorRays,
{
    /// Creates a rig from two calibrated cameras that triangulates rays with `triangulator`.
    pub fn with_triangulator(first: CalibratedCamera, second: CalibratedCamera, triangulator: T) -> Self {
        log::debug!(
            "triangulator with a baseline of {} between {:?} and {:?}",
            first.optical_center().distance(second.optical_center()),
            first.optical_center().0,
            second.optical_center().0
        );
        Self {
            cameras: [first, second],
            triangulator,
        }
    }

    /// Estimates the world position of a point seen at `first` by the first camera and at `second`
    /// by the second camera.
    ///
    /// Fails with [`SightingError::ParallelRays`](sighting_core::SightingError::ParallelRays) when
    /// the two rays are parallel, for instance when the point lies on the baseline through both
    /// cameras. Only this observation is affected, the triangulator stays usable.
    pub fn triangulate<A, B>(&self, first: A, second: B) -> Result<WorldPoint>
    where
        A: ImagePoint,
        B: ImagePoint,
    {
        self.triangulate_detailed(first, second)
            .map(|sighting| sighting.point)
    }

    /// Same as [`Triangulator::triangulate`], but also returns the closest point on each ray.
    pub fn triangulate_detailed<A, B>(&self, first: A, second: B) -> Result<Sighting>
    where
        A: ImagePoint,
        B: ImagePoint,
    {
        let [camera_a, camera_b] = &self.cameras;
        self.triangulator
            .triangulate_rays(camera_a.ray(first), camera_b.ray(second))
            .map_err(|error| {
                log::debug!("rejected observation: {}", error);
                error
            })
    }

    /// Recalibrates one anchor of one camera from a newly picked pixel.
    ///
    /// On failure the camera keeps its previous calibration.
    pub fn update_anchor(
        &mut self,
        camera: CameraIndex,
        anchor: AnchorIndex,
        pixel: impl Into<KeyPoint>,
    ) -> Result<()> {
        self.cameras[camera.index()].update_anchor(anchor, pixel)
    }

    pub fn camera(&self, camera: CameraIndex) -> &CalibratedCamera {
        &self.cameras[camera.index()]
    }

    pub fn cameras(&self) -> &[CalibratedCamera; 2] {
        &self.cameras
    }

    /// The world positions of the first and second camera.
    pub fn origins(&self) -> [WorldPoint; 2] {
        [
            self.cameras[0].optical_center(),
            self.cameras[1].optical_center(),
        ]
    }

    /// Distance between the two optical centers.
    pub fn baseline(&self) -> f64 {
        let [a, b] = self.origins();
        a.distance(b)
    }

    /// Gives back the cameras.
    pub fn into_cameras(self) -> [CalibratedCamera; 2] {
        self.cameras
    }
}
