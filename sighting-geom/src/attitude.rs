use num_traits::Float;
use sighting_core::{
    nalgebra::{Matrix3, Vector3},
    Frame, Result, SightingError,
};

/// Determines the basis change between two frames from two directions known in both.
///
/// This is a two-vector attitude determination in the spirit of TRIAD. Given two directions
/// `a1`, `a2` expressed in a source frame and the same two physical directions `b1`, `b2`
/// expressed in a target frame, a third direction is built in each frame as the cross product of
/// the first two. The three directions form the columns of `A = [a1 a2 a1×a2]` and
/// `B = [b1 b2 b1×b2]`, and the basis change is `R = B · A⁻¹`.
///
/// Only two constraints are given, so `R` is not forced to be orthonormal. If the angle between
/// `a1` and `a2` differs from the angle between `b1` and `b2` (noisy anchors), `R` absorbs the
/// inconsistency as a small scale or shear. Use [`orthonormality_error`] to measure it.
///
/// ```
/// use sighting_core::nalgebra::{Rotation3, Vector3};
/// use sighting_geom::TwoVectorAttitude;
///
/// let rotation = Rotation3::from_euler_angles(0.3, -0.2, 1.1);
/// let a1 = Vector3::new(1.0, 0.2, 0.1).normalize();
/// let a2 = Vector3::new(-0.1, 1.0, 0.4).normalize();
/// let solved = TwoVectorAttitude::new()
///     .solve(a1, a2, rotation * a1, rotation * a2)
///     .unwrap();
/// assert!((solved - rotation.matrix()).norm() < 1e-9);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct TwoVectorAttitude {
    epsilon: f64,
}

impl TwoVectorAttitude {
    /// Creates a `TwoVectorAttitude` with default values.
    ///
    /// Same as calling [`Default::default`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the smallest absolute determinant a basis may have before it is considered singular.
    ///
    /// For unit inputs the determinant is the squared sine of the angle between the two directions.
    ///
    /// Default is `1e-12`.
    #[must_use]
    pub fn epsilon(self, epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Computes the matrix carrying directions from the source frame into the target frame.
    ///
    /// `a1` and `a2` are expressed in the source frame, `b1` and `b2` are the same two physical
    /// directions in the target frame. All four are expected to be unit vectors.
    pub fn solve(
        &self,
        a1: Vector3<f64>,
        a2: Vector3<f64>,
        b1: Vector3<f64>,
        b2: Vector3<f64>,
    ) -> Result<Matrix3<f64>> {
        let a = self.basis(a1, a2, Frame::Source)?;
        let b = self.basis(b1, b2, Frame::Target)?;
        let a_inverse = a.try_inverse().ok_or(SightingError::SingularBasis {
            frame: Frame::Source,
        })?;
        Ok(b * a_inverse)
    }

    fn basis(&self, v1: Vector3<f64>, v2: Vector3<f64>, frame: Frame) -> Result<Matrix3<f64>> {
        let basis = Matrix3::from_columns(&[v1, v2, v1.cross(&v2)]);
        let determinant = basis.determinant();
        if !determinant.is_finite() || Float::abs(determinant) <= self.epsilon {
            return Err(SightingError::SingularBasis { frame });
        }
        Ok(basis)
    }
}

impl Default for TwoVectorAttitude {
    fn default() -> Self {
        Self { epsilon: 1e-12 }
    }
}

/// Frobenius norm of `MᵀM - I`.
///
/// This is zero for a proper rotation or reflection and grows with the scale and shear a
/// two-vector solve picked up from inconsistent inputs.
pub fn orthonormality_error(matrix: &Matrix3<f64>) -> f64 {
    (matrix.transpose() * matrix - Matrix3::identity()).norm()
}
