// vehicles_core/src/models/dynamics/noise.rs

use crate::error::DynamicsError;
use nalgebra::DVector;
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

/// Additive Gaussian noise on a velocity vector.
///
/// Component `i` of a velocity `w0` is perturbed by a zero-mean Gaussian sample
/// with variance `drift[i] + mult[i] * |w0[i]|`: a constant floor plus a term
/// proportional to the commanded speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseModel {
    drift: DVector<f64>,
    mult: DVector<f64>,
}

impl NoiseModel {
    /// The noiseless model for a `dimension`-dimensional velocity.
    pub fn none(dimension: usize) -> Self {
        Self {
            drift: DVector::zeros(dimension),
            mult: DVector::zeros(dimension),
        }
    }

    /// Unchecked until the owning model validates it against its algebra dimension.
    pub fn new(drift: DVector<f64>, mult: DVector<f64>) -> Self {
        Self { drift, mult }
    }

    pub fn from_slices(drift: &[f64], mult: &[f64]) -> Self {
        Self::new(
            DVector::from_column_slice(drift),
            DVector::from_column_slice(mult),
        )
    }

    pub fn drift(&self) -> &DVector<f64> {
        &self.drift
    }

    pub fn mult(&self) -> &DVector<f64> {
        &self.mult
    }

    pub fn dimension(&self) -> usize {
        self.drift.len()
    }

    pub fn is_zero(&self) -> bool {
        self.drift.iter().chain(self.mult.iter()).all(|x| *x == 0.0)
    }

    /// Checks both vectors have length `dimension` and hold finite, non-negative values.
    pub fn validate(&self, model: &str, dimension: usize) -> Result<(), DynamicsError> {
        for (field, values) in [("drift", &self.drift), ("mult", &self.mult)] {
            if values.len() != dimension {
                return Err(DynamicsError::construction(
                    model,
                    format!(
                        "noise {field} has {} entries, expected {dimension}",
                        values.len()
                    ),
                ));
            }
            if values.iter().any(|x| !x.is_finite() || *x < 0.0) {
                return Err(DynamicsError::construction(
                    model,
                    format!(
                        "noise {field} must be finite and non-negative, got {:?}",
                        values.as_slice()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Per-component variance `drift + mult ⊙ |w0|`.
    pub fn variance(&self, w0: &DVector<f64>) -> DVector<f64> {
        &self.drift + self.mult.component_mul(&w0.abs())
    }

    /// Returns `w0` plus one independent Gaussian sample per component.
    pub fn perturb(&self, w0: &DVector<f64>, rng: &mut dyn RngCore) -> DVector<f64> {
        let sigma = self.variance(w0).map(f64::sqrt);
        let samples = DVector::from_iterator(
            sigma.len(),
            sigma.iter().map(|s| {
                let z: f64 = StandardNormal.sample(&mut *rng);
                z * s
            }),
        );
        w0 + samples
    }
}
