use crate::{Error, Triangulator};
use serde::{Deserialize, Serialize};
use sighting_core::{Result, WorldPoint};
use sighting_geom::{MidpointTriangulator, TwoVectorAttitude};
use sighting_pinhole::{CalibratedCamera, CalibrationAnchor, CameraIntrinsics};

/// Everything needed to set up a [`Triangulator`].
///
/// All positions are in the shared local Cartesian frame. Geodetic positions must be converted
/// before they are put here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigConfig {
    pub cameras: [CameraConfig; 2],
    #[serde(default)]
    pub tolerances: Tolerances,
}

/// One camera of a rig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    /// The optical center of the camera.
    pub position: [f64; 3],
    pub anchors: [AnchorConfig; 2],
}

/// One calibration anchor of a camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorConfig {
    pub world: [f64; 3],
    pub pixel: [f64; 2],
}

/// Numeric tolerances used when building the rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Smallest basis determinant accepted when orienting a camera.
    #[serde(default = "default_singular")]
    pub singular: f64,
    /// Smallest squared sine between two rays accepted when triangulating.
    #[serde(default = "default_parallel")]
    pub parallel: f64,
}

fn default_singular() -> f64 {
    1e-12
}

fn default_parallel() -> f64 {
    1e-12
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            singular: default_singular(),
            parallel: default_parallel(),
        }
    }
}

impl RigConfig {
    /// Parses a rig configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a rig configuration from a JSON reader, such as an opened file.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the configuration and calibrates both cameras.
    pub fn build(&self) -> Result<Triangulator> {
        let attitude = TwoVectorAttitude::new().epsilon(self.tolerances.singular);
        let [first, second] = &self.cameras;
        Ok(Triangulator::with_triangulator(
            first.build(attitude)?,
            second.build(attitude)?,
            MidpointTriangulator::new().epsilon(self.tolerances.parallel),
        ))
    }
}

impl CameraConfig {
    pub fn intrinsics(&self) -> CameraIntrinsics {
        CameraIntrinsics::from_parameters(self.fx, self.fy, self.cx, self.cy)
    }

    fn build(&self, attitude: TwoVectorAttitude) -> Result<CalibratedCamera> {
        CalibratedCamera::with_attitude(
            self.intrinsics(),
            WorldPoint::from(self.position),
            self.anchors.map(AnchorConfig::anchor),
            attitude,
        )
    }
}

impl AnchorConfig {
    pub fn anchor(self) -> CalibrationAnchor {
        CalibrationAnchor::new(self.world, self.pixel)
    }
}

impl From<&CalibratedCamera> for CameraConfig {
    fn from(camera: &CalibratedCamera) -> Self {
        let intrinsics = camera.intrinsics();
        let anchors = *camera.anchors();
        Self {
            fx: intrinsics.focals.x,
            fy: intrinsics.focals.y,
            cx: intrinsics.principal_point.x,
            cy: intrinsics.principal_point.y,
            position: camera.optical_center().0.coords.into(),
            anchors: anchors.map(|anchor| AnchorConfig {
                world: anchor.world.0.coords.into(),
                pixel: anchor.pixel.0.coords.into(),
            }),
        }
    }
}
