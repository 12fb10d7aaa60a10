// vehicles_core/src/manifold/se3.rs

use super::{
    from_dvector, to_dvector, twist, GroupKind, LieGroup, ManifoldError, PoseGroup, Twist,
    SMALL_ANGLE,
};
use nalgebra::{DVector, Isometry3, Matrix3, Translation3, UnitQuaternion, Vector3, Vector6};

/// The ambient group of 3D rigid motions. Its algebra is the body twist `[v; ω]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Se3;

/// Left Jacobian of SO(3), mapping the linear part of a twist to the translation of
/// its exponential.
fn left_jacobian(omega: &Vector3<f64>) -> Matrix3<f64> {
    let theta = omega.norm();
    let k = omega.cross_matrix();
    let k2 = k * k;
    if theta < SMALL_ANGLE {
        Matrix3::identity() + k * 0.5 + k2 / 6.0
    } else {
        let t2 = theta * theta;
        Matrix3::identity()
            + k * ((1.0 - theta.cos()) / t2)
            + k2 * ((theta - theta.sin()) / (t2 * theta))
    }
}

fn left_jacobian_inverse(omega: &Vector3<f64>) -> Matrix3<f64> {
    let theta = omega.norm();
    let k = omega.cross_matrix();
    let k2 = k * k;
    if theta < SMALL_ANGLE {
        Matrix3::identity() - k * 0.5 + k2 / 12.0
    } else {
        let t2 = theta * theta;
        let c = 1.0 / t2 - (1.0 + theta.cos()) / (2.0 * theta * theta.sin());
        Matrix3::identity() - k * 0.5 + k2 * c
    }
}

impl LieGroup for Se3 {
    type Element = Isometry3<f64>;
    type Algebra = Vector6<f64>;

    const KIND: GroupKind = GroupKind::Se3;
    const DIM: usize = 6;

    fn identity() -> Self::Element {
        Isometry3::identity()
    }

    fn compose(a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    fn inverse(a: &Self::Element) -> Self::Element {
        a.inverse()
    }

    fn exp(v: &Self::Algebra) -> Self::Element {
        let linear = v.fixed_rows::<3>(0).into_owned();
        let omega = v.fixed_rows::<3>(3).into_owned();
        Isometry3::from_parts(
            Translation3::from(left_jacobian(&omega) * linear),
            UnitQuaternion::from_scaled_axis(omega),
        )
    }

    fn log(g: &Self::Element) -> Self::Algebra {
        let omega = g.rotation.scaled_axis();
        let linear = left_jacobian_inverse(&omega) * g.translation.vector;
        twist(linear, omega)
    }

    fn algebra_zero() -> Self::Algebra {
        Vector6::zeros()
    }

    fn vector_from_algebra(v: &Self::Algebra) -> DVector<f64> {
        to_dvector(v)
    }

    fn algebra_from_vector(w: &DVector<f64>) -> Result<Self::Algebra, ManifoldError> {
        from_dvector(Self::KIND, w)
    }

    fn element_is_finite(g: &Self::Element) -> bool {
        g.translation.vector.iter().all(|x| x.is_finite())
            && g.rotation.coords.iter().all(|x| x.is_finite())
    }
}

impl PoseGroup for Se3 {
    fn embed(g: &Self::Element) -> Isometry3<f64> {
        *g
    }

    fn project(pose: &Isometry3<f64>) -> Self::Element {
        *pose
    }

    fn embed_algebra(v: &Self::Algebra) -> Twist {
        *v
    }

    fn project_algebra(twist: &Twist) -> Self::Algebra {
        *twist
    }
}
