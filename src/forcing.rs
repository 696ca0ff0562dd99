//! # PVC forcing model
//!
//! Piecewise effective viscosity over the wavenumber magnitude. The
//! negative band K_MIN <= |k| <= K_MAX injects energy at intermediate
//! scales and sustains the turbulent state; everything above the band
//! is strongly damped.
use crate::error::{ActiveFlowError, Result};
use ndarray::Array2;

/// Steep damping applied above the injection band, in units of v_0
const UPPER_DAMPING: f64 = 10.0;

/// Band parameters of the piecewise viscosity curve.
#[derive(Debug, Clone, Copy)]
pub struct PvcModel {
    k_min: f64,
    k_max: f64,
    v_0: f64,
    v_ratio: f64,
}

impl PvcModel {
    /// Validated model with 0 <= k_min < k_max, v_0 > 0, v_ratio >= 0
    pub fn new(k_min: f64, k_max: f64, v_0: f64, v_ratio: f64) -> Result<PvcModel> {
        if !(k_min >= 0.0 && k_max > k_min) {
            return Err(ActiveFlowError::Config(format!(
                "forcing band must satisfy 0 <= k_min < k_max, got [{}, {}]",
                k_min, k_max
            )));
        }
        if !v_0.is_finite() || v_0 <= 0.0 {
            return Err(ActiveFlowError::Config(format!(
                "base viscosity must be positive, got {}",
                v_0
            )));
        }
        if !v_ratio.is_finite() || v_ratio < 0.0 {
            return Err(ActiveFlowError::Config(format!(
                "viscosity ratio must be non-negative, got {}",
                v_ratio
            )));
        }
        Ok(PvcModel {
            k_min,
            k_max,
            v_0,
            v_ratio,
        })
    }

    /// Effective viscosity at a single wavenumber magnitude.
    ///
    /// The negative band includes both of its edges: |k| exactly at
    /// k_max still lies inside the band.
    pub fn nu_eff(&self, k_norm: f64) -> f64 {
        if k_norm < self.k_min {
            self.v_0
        } else if k_norm <= self.k_max {
            -self.v_ratio * self.v_0
        } else {
            UPPER_DAMPING * self.v_0
        }
    }

    /// Effective viscosity over the whole wavenumber grid
    pub fn evaluate(&self, k_norm: &Array2<f64>) -> Array2<f64> {
        k_norm.mapv(|k| self.nu_eff(k))
    }
}
