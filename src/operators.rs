//! # Spectral operators
//!
//! Stream function inversion, velocity reconstruction and the two
//! terms of the vorticity equation, the nonlinear advection C and the
//! linear diffusion/injection A, all evaluated through the
//! 2-dimensional transforms.
use crate::fourier::Fourier2;
use crate::grid::Grid2;
use ndarray::Array2;
use num_complex::Complex64;

/// Velocity reconstructed from the spectral vorticity, in both spaces.
///
/// The physical pair feeds the CFL controller, the spectral pair the
/// energy diagnostic.
pub struct Velocity {
    /// x velocity in physical space
    pub u: Array2<f64>,
    /// y velocity in physical space
    pub v: Array2<f64>,
    /// x velocity in spectral space
    pub u_hat: Array2<Complex64>,
    /// y velocity in spectral space
    pub v_hat: Array2<Complex64>,
}

/// Velocity from vorticity via the stream function.
///
/// psi_hat = w_hat / |k|^2, then u = d psi/dy, v = -d psi/dx, which in
/// spectral space is u_hat = i k_y psi_hat, v_hat = -i k_x psi_hat.
pub fn velocity(w_hat: &Array2<Complex64>, grid: &Grid2, fourier: &mut Fourier2) -> Velocity {
    let psi_hat = w_hat * &grid.k_inverse;
    let u_hat = (&psi_hat * &grid.ky).mapv(|p| p * Complex64::i());
    let v_hat = (&psi_hat * &grid.kx).mapv(|p| -(p * Complex64::i()));
    let u = fourier.backward_re(&u_hat);
    let v = fourier.backward_re(&v_hat);
    Velocity { u, v, u_hat, v_hat }
}

/// Nonlinear advection term C(w_hat).
///
/// Transforms the spectral derivatives to physical space, forms
/// u dw/dx + v dw/dy pointwise, transforms back and dealiases.
pub fn advection(w_hat: &Array2<Complex64>, grid: &Grid2, fourier: &mut Fourier2) -> Array2<Complex64> {
    let psi_hat = w_hat * &grid.k_inverse;
    let u = fourier.backward_re(&(&psi_hat * &grid.ky).mapv(|p| p * Complex64::i()));
    let v = fourier.backward_re(&(&psi_hat * &grid.kx).mapv(|p| -(p * Complex64::i())));
    let dw_dx = fourier.backward_re(&(w_hat * &grid.kx).mapv(|p| p * Complex64::i()));
    let dw_dy = fourier.backward_re(&(w_hat * &grid.ky).mapv(|p| p * Complex64::i()));
    let transport = &u * &dw_dx + &v * &dw_dy;
    let mut c = fourier.forward_re(&transport);
    grid.apply_dealias(&mut c);
    c
}

/// Linear term A(w_hat) = nu_eff |k|^2 w_hat, dealiased.
///
/// nu_eff is negative inside the injection band, so this term both
/// damps and drives.
pub fn diffusion(w_hat: &Array2<Complex64>, nu_eff: &Array2<f64>, grid: &Grid2) -> Array2<Complex64> {
    let mut a = w_hat * nu_eff * &grid.k_square;
    grid.apply_dealias(&mut a);
    a
}
