// vehicles_core/src/manifold/so3.rs

use super::{from_dvector, to_dvector, GroupKind, LieGroup, ManifoldError, PoseGroup, Twist};
use nalgebra::{DVector, Isometry3, Translation3, UnitQuaternion, Vector3};

/// 3D rotations, stored as unit quaternions. The algebra is the body-frame angular
/// velocity vector (the "scaled axis" representation of so(3)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct So3;

impl LieGroup for So3 {
    type Element = UnitQuaternion<f64>;
    type Algebra = Vector3<f64>;

    const KIND: GroupKind = GroupKind::So3;
    const DIM: usize = 3;

    fn identity() -> Self::Element {
        UnitQuaternion::identity()
    }

    fn compose(a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    fn inverse(a: &Self::Element) -> Self::Element {
        a.inverse()
    }

    fn exp(v: &Self::Algebra) -> Self::Element {
        UnitQuaternion::from_scaled_axis(*v)
    }

    fn log(g: &Self::Element) -> Self::Algebra {
        g.scaled_axis()
    }

    fn algebra_zero() -> Self::Algebra {
        Vector3::zeros()
    }

    fn vector_from_algebra(v: &Self::Algebra) -> DVector<f64> {
        to_dvector(v)
    }

    fn algebra_from_vector(w: &DVector<f64>) -> Result<Self::Algebra, ManifoldError> {
        from_dvector(Self::KIND, w)
    }

    fn element_is_finite(g: &Self::Element) -> bool {
        g.coords.iter().all(|x| x.is_finite())
    }
}

impl PoseGroup for So3 {
    fn embed(g: &Self::Element) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::identity(), *g)
    }

    fn project(pose: &Isometry3<f64>) -> Self::Element {
        pose.rotation
    }

    fn embed_algebra(v: &Self::Algebra) -> Twist {
        super::twist(Vector3::zeros(), *v)
    }

    fn project_algebra(twist: &Twist) -> Self::Algebra {
        twist.fixed_rows::<3>(3).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_exp_is_body_frame_rotation() {
        let yaw = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2);
        // Rolling about the body x axis after a yaw is a rotation about world y.
        let rolled = So3::compose(&yaw, &So3::exp(&Vector3::new(FRAC_PI_2, 0.0, 0.0)));
        let body_z = rolled * Vector3::z();
        assert_abs_diff_eq!(body_z, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_exp_log_round_trip() {
        let v = Vector3::new(0.1, -0.4, 0.9);
        assert_abs_diff_eq!(So3::log(&So3::exp(&v)), v, epsilon = 1e-12);
        assert_abs_diff_eq!(So3::log(&So3::identity()), Vector3::zeros());
    }

    #[test]
    fn test_project_drops_translation() {
        let pose = Isometry3::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.2, 0.1, -0.3));
        let g = So3::project(&pose);
        let axis_angle = Vector3::new(0.2, 0.1, -0.3);
        assert_abs_diff_eq!(g.scaled_axis(), axis_angle, epsilon = 1e-12);
        assert_abs_diff_eq!(So3::embed(&g).translation.vector, Vector3::zeros());
    }
}
