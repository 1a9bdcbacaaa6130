use sighting_core::{
    nalgebra::Vector3, Ray, Result, Sighting, SightingError, TriangulatorRays, WorldPoint,
};

/// Finds the closest approach of two infinite lines.
///
/// Each line is given by a point `r` on it and a direction `e` which need not be unit length.
/// With `n = e1 × e2` perpendicular to both lines, the parameters of the closest points are
///
/// ```text
/// t1 = ((e2 × n) · (r2 − r1)) / (n · n)
/// t2 = ((e1 × n) · (r2 − r1)) / (n · n)
/// ```
///
/// and the closest points are `p1 = r1 + t1·e1` and `p2 = r2 + t2·e2`.
///
/// ```
/// use sighting_core::{nalgebra::Vector3, WorldPoint};
/// use sighting_geom::SkewLineIntersector;
///
/// // Two lines crossing the z axis one unit apart.
/// let (p1, p2) = SkewLineIntersector::new()
///     .closest_points(
///         WorldPoint::new(-1.0, 0.0, 0.0),
///         WorldPoint::new(0.0, -1.0, 1.0),
///         Vector3::x(),
///         Vector3::y(),
///     )
///     .unwrap();
/// assert!(p1.distance(WorldPoint::new(0.0, 0.0, 0.0)) < 1e-12);
/// assert!(p2.distance(WorldPoint::new(0.0, 0.0, 1.0)) < 1e-12);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct SkewLineIntersector {
    epsilon: f64,
}

impl SkewLineIntersector {
    /// Creates a `SkewLineIntersector` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the tolerance below which two directions are considered parallel.
    ///
    /// The test is `|e1 × e2|² ≤ epsilon · |e1|² · |e2|²`, the squared sine of the angle between the
    /// directions, so it does not depend on how long the directions are.
    ///
    /// Default is `1e-12`.
    #[must_use]
    pub fn epsilon(self, epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Computes the point on each line closest to the other line.
    ///
    /// The distance between the two returned points is the minimum distance between the lines.
    /// Fails with [`SightingError::ParallelRays`] when the directions are parallel, anti-parallel,
    /// or degenerate, since the closest points are then not unique.
    pub fn closest_points(
        &self,
        r1: WorldPoint,
        r2: WorldPoint,
        e1: Vector3<f64>,
        e2: Vector3<f64>,
    ) -> Result<(WorldPoint, WorldPoint)> {
        let n = e1.cross(&e2);
        let n_dot_n = n.norm_squared();
        // Negated so that NaN also fails.
        if !(n_dot_n > self.epsilon * e1.norm_squared() * e2.norm_squared()) {
            return Err(SightingError::ParallelRays {
                cross_norm_squared: n_dot_n,
            });
        }

        let baseline = r2.relative_to(r1);
        let t1 = e2.cross(&n).dot(&baseline) / n_dot_n;
        let t2 = e1.cross(&n).dot(&baseline) / n_dot_n;
        Ok((
            WorldPoint(r1.0 + e1 * t1),
            WorldPoint(r2.0 + e2 * t2),
        ))
    }
}

impl Default for SkewLineIntersector {
    fn default() -> Self {
        Self { epsilon: 1e-12 }
    }
}

/// Triangulates two rays as the midpoint of their closest-approach segment.
///
/// When the rays intersect this is the intersection. When they are skew (the usual case with real
/// observations) it is the point halfway between the two rays where they pass closest.
///
/// ```
/// use sighting_core::{nalgebra::Vector3, Ray, TriangulatorRays, WorldPoint};
/// use sighting_geom::MidpointTriangulator;
///
/// let point = WorldPoint::new(5.0, 5.0, 0.0);
/// let a = Ray::new(WorldPoint::origin(), point.relative_to(WorldPoint::origin()));
/// let b = Ray::new(WorldPoint::new(10.0, 0.0, 0.0), point.relative_to(WorldPoint::new(10.0, 0.0, 0.0)));
/// let sighting = MidpointTriangulator::new().triangulate_rays(a, b).unwrap();
/// assert!(sighting.point.distance(point) < 1e-9);
/// assert!(sighting.gap() < 1e-9);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct MidpointTriangulator {
    intersector: SkewLineIntersector,
}

impl MidpointTriangulator {
    /// Creates a `MidpointTriangulator` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the parallel ray tolerance. See [`SkewLineIntersector::epsilon`].
    #[must_use]
    pub fn epsilon(self, epsilon: f64) -> Self {
        Self {
            intersector: self.intersector.epsilon(epsilon),
        }
    }
}

impl TriangulatorRays for MidpointTriangulator {
    fn triangulate_rays(&self, a: Ray, b: Ray) -> Result<Sighting> {
        let (p1, p2) =
            self.intersector
                .closest_points(a.origin, b.origin, a.direction, b.direction)?;
        let sighting = Sighting {
            point: p1.midpoint(p2),
            closest: [p1, p2],
        };
        log::trace!(
            "triangulated {:?} with a closest approach gap of {}",
            sighting.point.0,
            sighting.gap()
        );
        Ok(sighting)
    }
}
