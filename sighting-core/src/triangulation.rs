use crate::{Ray, Result, WorldPoint};

/// The result of triangulating two rays.
///
/// Two observation rays are almost never exactly coplanar. `closest` holds the point on each ray
/// that realizes the minimum distance between the two lines, and `point` is the estimate derived
/// from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    /// The estimated world position of the observed point.
    pub point: WorldPoint,
    /// The closest point on the first and second ray respectively.
    pub closest: [WorldPoint; 2],
}

impl Sighting {
    /// Distance between the two rays at their closest approach.
    ///
    /// This is zero when the rays truly intersect and grows with calibration or pixel error.
    pub fn gap(&self) -> f64 {
        self.closest[0].distance(self.closest[1])
    }
}

/// This trait is for algorithms which estimate a 3d point from two rays in the world frame.
pub trait TriangulatorRays {
    fn triangulate_rays(&self, a: Ray, b: Ray) -> Result<Sighting>;
}
