// vehicles_core/src/manifold/mod.rs

//! The matrix Lie groups vehicles move on, implemented on top of `nalgebra`.
//!
//! Every pose space is a subgroup of SE(3). A group is a zero-sized marker type
//! implementing [`LieGroup`] (composition, exponential map, algebra isomorphism)
//! and [`PoseGroup`] (embedding into and projection out of the ambient SE(3)).
//! The dynamics models never touch the concrete element types directly; they only
//! go through these two traits.

use nalgebra::{DVector, Isometry3, SVector, Vector3, Vector6};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::ops::{Add, Div, Mul, Neg, Sub};
use thiserror::Error;

pub mod euclidean;
pub mod se2;
pub mod se3;
pub mod so2;
pub mod so3;

pub use euclidean::{Tran, Tran1, Tran2, Tran3};
pub use se2::Se2;
pub use se3::Se3;
pub use so2::So2;
pub use so3::So3;

/// A body-frame velocity in se(3), ordered `[vx, vy, vz, wx, wy, wz]`.
pub type Twist = Vector6<f64>;

/// Below this angle the closed-form exponential/log maps switch to their Taylor expansions.
pub(crate) const SMALL_ANGLE: f64 = 1e-9;

// --- Group descriptor ---

/// Runtime descriptor for the supported pose spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    Tran1,
    Tran2,
    Tran3,
    So2,
    So3,
    Se2,
    Se3,
}

impl GroupKind {
    /// Dimension of the group's Lie algebra (number of velocity components).
    pub fn dimension(self) -> usize {
        match self {
            GroupKind::Tran1 | GroupKind::So2 => 1,
            GroupKind::Tran2 => 2,
            GroupKind::Tran3 | GroupKind::So3 | GroupKind::Se2 => 3,
            GroupKind::Se3 => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GroupKind::Tran1 => "Tran1",
            GroupKind::Tran2 => "Tran2",
            GroupKind::Tran3 => "Tran3",
            GroupKind::So2 => "SO2",
            GroupKind::So3 => "SO3",
            GroupKind::Se2 => "SE2",
            GroupKind::Se3 => "SE3",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManifoldError {
    #[error("{group}: expected a vector of length {expected}, got {got}")]
    DimensionMismatch {
        group: GroupKind,
        expected: usize,
        got: usize,
    },
}

// --- Core traits ---

/// A matrix Lie group together with its Lie algebra.
///
/// Algebra elements are the coordinates of the tangent space at the identity. They
/// form a vector space, so velocities can be summed, negated and scaled by time.
pub trait LieGroup: Debug + Clone + Copy + Default + PartialEq + Send + Sync + 'static {
    /// A group element (a pose).
    type Element: Clone + Debug + PartialEq + Send + Sync;

    /// An element of the Lie algebra (a velocity, or a force for inertial models).
    type Algebra: Copy
        + Debug
        + PartialEq
        + Send
        + Sync
        + Add<Output = Self::Algebra>
        + Sub<Output = Self::Algebra>
        + Neg<Output = Self::Algebra>
        + Mul<f64, Output = Self::Algebra>
        + Div<f64, Output = Self::Algebra>;

    const KIND: GroupKind;

    /// Dimension of the algebra, i.e. the length of its vector representation.
    const DIM: usize;

    fn identity() -> Self::Element;

    /// Group composition `a · b`. Not commutative in general.
    fn compose(a: &Self::Element, b: &Self::Element) -> Self::Element;

    fn inverse(a: &Self::Element) -> Self::Element;

    /// Exponential map: algebra -> group ("group from algebra").
    fn exp(v: &Self::Algebra) -> Self::Element;

    /// Logarithm map, the inverse of [`LieGroup::exp`] away from the cut locus.
    fn log(g: &Self::Element) -> Self::Algebra;

    fn algebra_zero() -> Self::Algebra;

    /// The fixed linear isomorphism from the algebra to `R^DIM`.
    fn vector_from_algebra(v: &Self::Algebra) -> DVector<f64>;

    /// Inverse of [`LieGroup::vector_from_algebra`].
    fn algebra_from_vector(w: &DVector<f64>) -> Result<Self::Algebra, ManifoldError>;

    fn element_is_finite(g: &Self::Element) -> bool;

    fn algebra_is_finite(v: &Self::Algebra) -> bool {
        Self::vector_from_algebra(v).iter().all(|x| x.is_finite())
    }
}

/// A subgroup of SE(3): poses and velocities can be embedded into the ambient
/// rigid-motion group and projected back out of it.
///
/// `project(embed(g)) == g` for every element; `embed(project(p))` drops the
/// degrees of freedom the subgroup does not represent.
pub trait PoseGroup: LieGroup {
    fn embed(g: &Self::Element) -> Isometry3<f64>;

    /// The closest subgroup element to an arbitrary SE(3) pose.
    fn project(pose: &Isometry3<f64>) -> Self::Element;

    fn embed_algebra(v: &Self::Algebra) -> Twist;

    fn project_algebra(twist: &Twist) -> Self::Algebra;
}

// --- Helpers shared by the group implementations ---

pub(crate) fn to_dvector<const N: usize>(v: &SVector<f64, N>) -> DVector<f64> {
    DVector::from_column_slice(v.as_slice())
}

pub(crate) fn from_dvector<const N: usize>(
    group: GroupKind,
    w: &DVector<f64>,
) -> Result<SVector<f64, N>, ManifoldError> {
    if w.len() != N {
        return Err(ManifoldError::DimensionMismatch {
            group,
            expected: N,
            got: w.len(),
        });
    }
    Ok(SVector::<f64, N>::from_column_slice(w.as_slice()))
}

/// Builds a twist from its linear part `v` and angular part `w`.
pub fn twist(v: Vector3<f64>, w: Vector3<f64>) -> Twist {
    Twist::new(v.x, v.y, v.z, w.x, w.y, w.z)
}

/// Expresses a body twist in a frame rigidly attached to the body.
///
/// `offset` is the pose of the attached frame in the body frame. The attached frame
/// sees the same angular velocity, plus the lever-arm term `ω × p` on the linear part.
pub fn twist_in_frame(offset: &Isometry3<f64>, body_twist: &Twist) -> Twist {
    let v = body_twist.fixed_rows::<3>(0).into_owned();
    let w = body_twist.fixed_rows::<3>(3).into_owned();
    let p = offset.translation.vector;
    let r_inv = offset.rotation.inverse();

    twist(r_inv * (v + w.cross(&p)), r_inv * w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Translation3, UnitQuaternion};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_dimensions_match_groups() {
        assert_eq!(GroupKind::Tran1.dimension(), Tran1::DIM);
        assert_eq!(GroupKind::Tran2.dimension(), Tran2::DIM);
        assert_eq!(GroupKind::Tran3.dimension(), Tran3::DIM);
        assert_eq!(GroupKind::So2.dimension(), So2::DIM);
        assert_eq!(GroupKind::So3.dimension(), So3::DIM);
        assert_eq!(GroupKind::Se2.dimension(), Se2::DIM);
        assert_eq!(GroupKind::Se3.dimension(), Se3::DIM);
    }

    #[test]
    fn test_from_dvector_rejects_wrong_length() {
        let err = from_dvector::<3>(GroupKind::Se2, &DVector::zeros(2)).unwrap_err();
        assert_eq!(
            err,
            ManifoldError::DimensionMismatch {
                group: GroupKind::Se2,
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn test_twist_in_frame_identity_offset() {
        let body = Twist::new(1.0, 2.0, 3.0, 0.1, 0.2, 0.3);
        let out = twist_in_frame(&Isometry3::identity(), &body);
        assert_abs_diff_eq!(out, body, epsilon = 1e-12);
    }

    #[test]
    fn test_twist_in_frame_lever_arm() {
        // Spinning about z at 1 rad/s, a point 1 m ahead moves sideways at 1 m/s.
        let body = twist(Vector3::zeros(), Vector3::new(0.0, 0.0, 1.0));
        let offset = Isometry3::translation(1.0, 0.0, 0.0);
        let out = twist_in_frame(&offset, &body);
        let sideways = Twist::new(0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(out, sideways, epsilon = 1e-12);

        // Same point, but the attached frame is yawed by 90 degrees.
        let yawed = Isometry3::from_parts(
            Translation3::new(1.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );
        let out = twist_in_frame(&yawed, &body);
        let forward = Twist::new(1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(out, forward, epsilon = 1e-12);
    }
}
