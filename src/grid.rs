//! # Doubly periodic grid
//!
//! Physical coordinates and spectral wavenumbers of the N x N square
//! domain, together with the operators derived from them: the 2/3-rule
//! dealiasing mask and the inverse Laplacian.
use crate::error::{ActiveFlowError, Result};
use ndarray::{Array1, Array2, Zip};
use num_complex::Complex64;
use num_traits::Zero;
use std::f64::consts::PI;

/// Immutable discretization of the doubly periodic square domain.
///
/// Constructed once per run and shared by read-only reference into
/// every operator and scheme call.
///
/// # Example
/// ```
/// use activeflow::Grid2;
/// use std::f64::consts::PI;
///
/// let grid = Grid2::new(PI, 128).unwrap();
/// assert_eq!(grid.dx, PI / 128.);
/// assert_eq!(grid.dk, 2.);
/// ```
#[derive(Debug, Clone)]
pub struct Grid2 {
    /// Collocation points per axis
    pub n: usize,
    /// Domain side length
    pub length: f64,
    /// x coordinate at every grid point
    pub x: Array2<f64>,
    /// y coordinate at every grid point
    pub y: Array2<f64>,
    /// Grid spacing L/N
    pub dx: f64,
    /// x wavenumber at every grid point
    pub kx: Array2<f64>,
    /// y wavenumber at every grid point
    pub ky: Array2<f64>,
    /// Wavenumber spacing 2 pi / L
    pub dk: f64,
    /// Squared wavenumber magnitude
    pub k_square: Array2<f64>,
    /// Wavenumber magnitude
    pub k_norm: Array2<f64>,
    /// Inverse Laplacian 1/|k|^2, zero at the mean mode
    pub k_inverse: Array2<f64>,
    /// Dealiasing mask, true below the 2/3-Nyquist cutoff
    pub dealias: Array2<bool>,
}

impl Grid2 {
    /// Discretize the domain \[0, L) x \[0, L) with n points per axis.
    ///
    /// The spatial axis excludes the right endpoint (periodic
    /// identification); the wavenumber axis follows the standard
    /// frequency ordering, zero first, then positive, then negative
    /// frequencies, scaled by 2 pi / L.
    pub fn new(length: f64, n: usize) -> Result<Grid2> {
        if !length.is_finite() || length <= 0.0 {
            return Err(ActiveFlowError::Config(format!(
                "domain length must be positive, got {}",
                length
            )));
        }
        if n < 4 || n % 2 != 0 {
            return Err(ActiveFlowError::Config(format!(
                "collocation points must be even and at least 4, got {}",
                n
            )));
        }

        // Spatial domain
        let dx = length / n as f64;
        let axis = Array1::from_shape_fn(n, |i| i as f64 * dx);
        let x = Array2::from_shape_fn((n, n), |(_, j)| axis[j]);
        let y = Array2::from_shape_fn((n, n), |(i, _)| axis[i]);

        // Frequency domain
        let dk = 2.0 * PI / length;
        let k_axis = wavenumber_axis(n, length);
        let kx = Array2::from_shape_fn((n, n), |(_, j)| k_axis[j]);
        let ky = Array2::from_shape_fn((n, n), |(i, _)| k_axis[i]);
        let k_square = &kx * &kx + &ky * &ky;
        let k_norm = k_square.mapv(f64::sqrt);
        let k_inverse = k_square.mapv(|k2| if k2 == 0.0 { 0.0 } else { k2.recip() });

        // 2/3 rule
        let cutoff = 2.0 / 3.0 * (n as f64 / 2.0) * dk;
        let dealias = k_square.mapv(|k2| k2 < cutoff * cutoff);

        Ok(Grid2 {
            n,
            length,
            x,
            y,
            dx,
            kx,
            ky,
            dk,
            k_square,
            k_norm,
            k_inverse,
            dealias,
        })
    }

    /// Zero all spectral modes outside the resolved band.
    pub fn apply_dealias(&self, w_hat: &mut Array2<Complex64>) {
        Zip::from(w_hat).and(&self.dealias).for_each(|w, &resolved| {
            if !resolved {
                *w = Complex64::zero();
            }
        });
    }
}

/// Standard frequency ordering 0, 1, .., n/2-1, -n/2, .., -1 scaled by 2 pi / L
fn wavenumber_axis(n: usize, length: f64) -> Array1<f64> {
    let scale = 2.0 * PI / length;
    Array1::from_shape_fn(n, |i| {
        if i < n / 2 {
            scale * i as f64
        } else {
            scale * (i as f64 - n as f64)
        }
    })
}
