use sighting_core::{KeyPoint, WorldPoint};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A point known both in the world frame and as a pixel in one camera's image.
///
/// The world position is fixed once the anchor is created. The pixel may be picked again later
/// to recalibrate the camera (see [`CalibratedCamera::update_anchor`](crate::CalibratedCamera::update_anchor)).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CalibrationAnchor {
    pub world: WorldPoint,
    pub pixel: KeyPoint,
}

impl CalibrationAnchor {
    pub fn new(world: impl Into<WorldPoint>, pixel: impl Into<KeyPoint>) -> Self {
        Self {
            world: world.into(),
            pixel: pixel.into(),
        }
    }

    /// The same anchor observed at a different pixel.
    #[must_use]
    pub fn with_pixel(self, pixel: impl Into<KeyPoint>) -> Self {
        Self {
            pixel: pixel.into(),
            ..self
        }
    }
}
