// vehicles_core/src/manifold/se2.rs

use super::{
    from_dvector, so2::planar_angle, to_dvector, GroupKind, LieGroup, ManifoldError, PoseGroup,
    Twist, SMALL_ANGLE,
};
use nalgebra::{DVector, Isometry2, Isometry3, Translation3, UnitQuaternion, Vector2, Vector3};

/// Planar rigid motions, embedded in SE(3) on the z = 0 plane.
///
/// Algebra coordinates are `[vx, vy, ω]`: body-frame linear velocity followed by
/// the yaw rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Se2;

/// Coefficients `(sin θ / θ, (1 - cos θ) / θ)` of the left Jacobian of SO(2).
fn jacobian_coefficients(theta: f64) -> (f64, f64) {
    if theta.abs() < SMALL_ANGLE {
        (1.0 - theta * theta / 6.0, theta / 2.0)
    } else {
        (theta.sin() / theta, (1.0 - theta.cos()) / theta)
    }
}

impl Se2 {
    /// Convenience constructor from a translation and a heading.
    pub fn from_xy_theta(x: f64, y: f64, theta: f64) -> Isometry2<f64> {
        Isometry2::new(Vector2::new(x, y), theta)
    }

    /// Builds an algebra element from a body-frame linear velocity and a yaw rate.
    pub fn algebra_from_linear_angular(linear: Vector2<f64>, angular: f64) -> Vector3<f64> {
        Vector3::new(linear.x, linear.y, angular)
    }
}

impl LieGroup for Se2 {
    type Element = Isometry2<f64>;
    type Algebra = Vector3<f64>;

    const KIND: GroupKind = GroupKind::Se2;
    const DIM: usize = 3;

    fn identity() -> Self::Element {
        Isometry2::identity()
    }

    fn compose(a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    fn inverse(a: &Self::Element) -> Self::Element {
        a.inverse()
    }

    fn exp(v: &Self::Algebra) -> Self::Element {
        let theta = v.z;
        let (a, b) = jacobian_coefficients(theta);
        let translation = Vector2::new(a * v.x - b * v.y, b * v.x + a * v.y);
        Isometry2::new(translation, theta)
    }

    fn log(g: &Self::Element) -> Self::Algebra {
        let theta = g.rotation.angle();
        let (a, b) = jacobian_coefficients(theta);
        let t = g.translation.vector;
        let det = a * a + b * b;
        Vector3::new((a * t.x + b * t.y) / det, (a * t.y - b * t.x) / det, theta)
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
        g.translation.vector.iter().all(|x| x.is_finite())
            && g.rotation.re.is_finite()
            && g.rotation.im.is_finite()
    }
}

impl PoseGroup for Se2 {
    fn embed(g: &Self::Element) -> Isometry3<f64> {
        let t = g.translation.vector;
        Isometry3::from_parts(
            Translation3::new(t.x, t.y, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), g.rotation.angle()),
        )
    }

    fn project(pose: &Isometry3<f64>) -> Self::Element {
        let t = pose.translation.vector;
        Isometry2::new(Vector2::new(t.x, t.y), planar_angle(&pose.rotation))
    }

    fn embed_algebra(v: &Self::Algebra) -> Twist {
        Twist::new(v.x, v.y, 0.0, 0.0, 0.0, v.z)
    }

    fn project_algebra(twist: &Twist) -> Self::Algebra {
        Vector3::new(twist[0], twist[1], twist[5])
    }
}
