// vehicles_core/src/manifold/euclidean.rs

use super::{from_dvector, to_dvector, GroupKind, LieGroup, ManifoldError, PoseGroup, Twist};
use nalgebra::{DVector, Isometry3, SVector, Translation3, UnitQuaternion, Vector3};

/// The translation group in `D` dimensions, embedded in SE(3) as pure translations
/// along the first `D` axes.
///
/// Composition is vector addition, so the exponential map is the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tran<const D: usize>;

pub type Tran1 = Tran<1>;
pub type Tran2 = Tran<2>;
pub type Tran3 = Tran<3>;

fn embed_vector<const D: usize>(v: &SVector<f64, D>) -> Vector3<f64> {
    let mut out = Vector3::zeros();
    for i in 0..D.min(3) {
        out[i] = v[i];
    }
    out
}

fn project_vector<const D: usize>(v: &Vector3<f64>) -> SVector<f64, D> {
    SVector::<f64, D>::from_fn(|i, _| if i < 3 { v[i] } else { 0.0 })
}

macro_rules! impl_translation_group {
    ($dim:literal, $kind:expr) => {
        impl LieGroup for Tran<$dim> {
            type Element = SVector<f64, $dim>;
            type Algebra = SVector<f64, $dim>;

            const KIND: GroupKind = $kind;
            const DIM: usize = $dim;

            fn identity() -> Self::Element {
                SVector::zeros()
            }

            fn compose(a: &Self::Element, b: &Self::Element) -> Self::Element {
                a + b
            }

            fn inverse(a: &Self::Element) -> Self::Element {
                -a
            }

            fn exp(v: &Self::Algebra) -> Self::Element {
                *v
            }

            fn log(g: &Self::Element) -> Self::Algebra {
                *g
            }

            fn algebra_zero() -> Self::Algebra {
                SVector::zeros()
            }

            fn vector_from_algebra(v: &Self::Algebra) -> DVector<f64> {
                to_dvector(v)
            }

            fn algebra_from_vector(w: &DVector<f64>) -> Result<Self::Algebra, ManifoldError> {
                from_dvector(Self::KIND, w)
            }

            fn element_is_finite(g: &Self::Element) -> bool {
                g.iter().all(|x| x.is_finite())
            }
        }

        impl PoseGroup for Tran<$dim> {
            fn embed(g: &Self::Element) -> Isometry3<f64> {
                Isometry3::from_parts(
                    Translation3::from(embed_vector(g)),
                    UnitQuaternion::identity(),
                )
            }

            fn project(pose: &Isometry3<f64>) -> Self::Element {
                project_vector(&pose.translation.vector)
            }

            fn embed_algebra(v: &Self::Algebra) -> Twist {
                super::twist(embed_vector(v), Vector3::zeros())
            }

            fn project_algebra(twist: &Twist) -> Self::Algebra {
                project_vector(&twist.fixed_rows::<3>(0).into_owned())
            }
        }
    };
}

impl_translation_group!(1, GroupKind::Tran1);
impl_translation_group!(2, GroupKind::Tran2);
impl_translation_group!(3, GroupKind::Tran3);
