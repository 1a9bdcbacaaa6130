use thiserror::Error;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Which of the two frames handed to an attitude solve was degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Frame {
    /// The frame the rotation maps from (the camera frame for a calibrated camera).
    Source,
    /// The frame the rotation maps into (the world frame for a calibrated camera).
    Target,
}

/// Every way the geometric estimation can fail.
///
/// None of these are retried internally. The computations are closed-form and deterministic,
/// so the same inputs always produce the same failure.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SightingError {
    /// The intrinsic matrix cannot be inverted because a focal length is zero.
    #[error("intrinsic matrix is singular (fx = {fx}, fy = {fy})")]
    SingularIntrinsics { fx: f64, fy: f64 },
    /// The two anchor directions are collinear in the given frame.
    #[error("anchor directions are collinear in the {frame:?} frame")]
    SingularBasis { frame: Frame },
    /// The two rays are parallel or anti-parallel within tolerance.
    #[error("rays are parallel (|e1 x e2|^2 = {cross_norm_squared:e})")]
    ParallelRays { cross_norm_squared: f64 },
    /// A camera holds exactly two anchors.
    #[error("anchor index {0} is out of range, expected 0 or 1")]
    InvalidAnchorIndex(usize),
}

pub type Result<T, E = SightingError> = core::result::Result<T, E>;
