//! # Running diagnostics
//!
//! Shell averaged kinetic energy at the first wavenumber shell, the
//! convergence monitor of a run, and the maximum velocity feeding the
//! CFL controller. Neither is part of the dynamics.
use crate::grid::Grid2;
use ndarray::{Array2, Zip};
use num_complex::Complex64;

/// Kinetic energy integrated over the annulus around |k| = dk.
///
/// The lowest non-trivial shell, a proxy for k = 1 in normalized
/// units; its energy saturating is the usual sign of a statistically
/// steady state.
pub struct ShellEnergy {
    shell: Array2<bool>,
    norm: f64,
}

impl ShellEnergy {
    /// Precompute the shell mask and normalization for a grid
    pub fn new(grid: &Grid2) -> ShellEnergy {
        let lower = grid.dk - grid.dk / 2.0;
        let upper = grid.dk + grid.dk / 2.0;
        let shell = grid.k_norm.mapv(|k| k >= lower && k < upper);
        // bin width of an N point subdivision of [0, max |k|]
        let k_max = grid.k_norm.iter().cloned().fold(0.0, f64::max);
        let factor = k_max / (grid.n as f64 - 1.0);
        let norm = factor * (grid.n as f64).powi(4);
        ShellEnergy { shell, norm }
    }

    /// E(k=1) = 1/2 sum over the shell of |u_hat|^2 + |v_hat|^2,
    /// normalized by the shell spacing factor and N^4.
    pub fn evaluate(&self, u_hat: &Array2<Complex64>, v_hat: &Array2<Complex64>) -> f64 {
        let mut sum = 0.0;
        Zip::from(&self.shell)
            .and(u_hat)
            .and(v_hat)
            .for_each(|&inside, u, v| {
                if inside {
                    sum += u.norm_sqr() + v.norm_sqr();
                }
            });
        0.5 * sum / self.norm
    }
}

/// Largest velocity magnitude on the grid
pub fn max_velocity(u: &Array2<f64>, v: &Array2<f64>) -> f64 {
    Zip::from(u)
        .and(v)
        .fold(0.0, |acc, &u, &v| acc.max((u * u + v * v).sqrt()))
}
