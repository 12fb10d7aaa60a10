// vehicles_core/src/manifold/so2.rs

use super::{from_dvector, to_dvector, GroupKind, LieGroup, ManifoldError, PoseGroup, Twist};
use nalgebra::{DVector, Isometry3, Translation3, UnitComplex, UnitQuaternion, Vector1, Vector3};

/// Planar rotations, embedded in SE(3) as rotations about the z axis.
/// The algebra is the scalar angular velocity `ω`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct So2;

/// Yaw of the planar rotation closest (in the Frobenius sense) to the upper-left
/// 2x2 block of `rotation`.
pub(crate) fn planar_angle(rotation: &UnitQuaternion<f64>) -> f64 {
    let r = rotation.to_rotation_matrix();
    let m = r.matrix();
    (m[(1, 0)] - m[(0, 1)]).atan2(m[(0, 0)] + m[(1, 1)])
}

impl LieGroup for So2 {
    type Element = UnitComplex<f64>;
    type Algebra = Vector1<f64>;

    const KIND: GroupKind = GroupKind::So2;
    const DIM: usize = 1;

    fn identity() -> Self::Element {
        UnitComplex::identity()
    }

    fn compose(a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    fn inverse(a: &Self::Element) -> Self::Element {
        a.inverse()
    }

    fn exp(v: &Self::Algebra) -> Self::Element {
        UnitComplex::new(v[0])
    }

    fn log(g: &Self::Element) -> Self::Algebra {
        Vector1::new(g.angle())
    }

    fn algebra_zero() -> Self::Algebra {
        Vector1::zeros()
    }

    fn vector_from_algebra(v: &Self::Algebra) -> DVector<f64> {
        to_dvector(v)
    }

    fn algebra_from_vector(w: &DVector<f64>) -> Result<Self::Algebra, ManifoldError> {
        from_dvector(Self::KIND, w)
    }

    fn element_is_finite(g: &Self::Element) -> bool {
        g.re.is_finite() && g.im.is_finite()
    }
}

impl PoseGroup for So2 {
    fn embed(g: &Self::Element) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), g.angle()),
        )
    }

    fn project(pose: &Isometry3<f64>) -> Self::Element {
        UnitComplex::new(planar_angle(&pose.rotation))
    }

    fn embed_algebra(v: &Self::Algebra) -> Twist {
        Twist::new(0.0, 0.0, 0.0, 0.0, 0.0, v[0])
    }

    fn project_algebra(twist: &Twist) -> Self::Algebra {
        Vector1::new(twist[5])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_exp_wraps_angles() {
        let g = So2::exp(&Vector1::new(3.0 * PI / 2.0));
        assert_abs_diff_eq!(g.angle(), -PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_log_inverts_exp() {
        for w in [0.0, 0.7, -2.5, 3.1, 1e-10] {
            let v = Vector1::new(w);
            assert_abs_diff_eq!(So2::log(&So2::exp(&v)), v, epsilon = 1e-12);
        }
        // Outside (-π, π] the log returns the wrapped representative.
        let v = Vector1::new(2.0 * PI + 0.5);
        assert_abs_diff_eq!(So2::log(&So2::exp(&v))[0], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_project_extracts_yaw() {
        let yaw = 0.7;
        let pose = Isometry3::from_parts(
            Translation3::new(5.0, 6.0, 7.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw),
        );
        assert_abs_diff_eq!(So2::project(&pose).angle(), yaw, epsilon = 1e-12);

        let embedded = So2::embed(&UnitComplex::new(yaw));
        assert_abs_diff_eq!(embedded.translation.vector, Vector3::zeros());
        assert_abs_diff_eq!(So2::project(&embedded).angle(), yaw, epsilon = 1e-12);
    }
}
