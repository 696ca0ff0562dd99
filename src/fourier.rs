//! # Two dimensional Fourier transforms
//!
//! Thin layer over ndrustfft with preplanned handlers and reusable
//! buffers. The forward transform is unnormalized, the backward
//! transform carries the 1/N^2 factor, so a forward/backward pair is
//! the identity.
use ndarray::Array2;
use ndrustfft::{ndfft_par, ndifft_par, FftHandler};
use num_complex::Complex64;

/// Planned complex transforms on an N x N grid.
///
/// Struct must be mutable; the transform handlers carry scratch space.
pub struct Fourier2 {
    n: usize,
    handler_x: FftHandler<f64>,
    handler_y: FftHandler<f64>,
    buffer: Array2<Complex64>,
    scratch: Array2<Complex64>,
}

impl Fourier2 {
    /// Plan transforms for an n x n grid
    pub fn new(n: usize) -> Fourier2 {
        Fourier2 {
            n,
            handler_x: FftHandler::new(n),
            handler_y: FftHandler::new(n),
            buffer: Array2::zeros((n, n)),
            scratch: Array2::zeros((n, n)),
        }
    }

    /// Physical space --> spectral space
    pub fn forward(&mut self, v: &Array2<Complex64>) -> Array2<Complex64> {
        let mut vhat = Array2::zeros((self.n, self.n));
        self.buffer.assign(v);
        ndfft_par(
            &mut self.buffer.view_mut(),
            &mut self.scratch.view_mut(),
            &mut self.handler_y,
            1,
        );
        ndfft_par(
            &mut self.scratch.view_mut(),
            &mut vhat.view_mut(),
            &mut self.handler_x,
            0,
        );
        vhat
    }

    /// Physical space (real valued) --> spectral space
    pub fn forward_re(&mut self, v: &Array2<f64>) -> Array2<Complex64> {
        let complex = v.mapv(|x| Complex64::new(x, 0.0));
        self.forward(&complex)
    }

    /// Spectral space --> physical space
    pub fn backward(&mut self, vhat: &Array2<Complex64>) -> Array2<Complex64> {
        let mut v = Array2::zeros((self.n, self.n));
        self.buffer.assign(vhat);
        ndifft_par(
            &mut self.buffer.view_mut(),
            &mut self.scratch.view_mut(),
            &mut self.handler_x,
            0,
        );
        ndifft_par(
            &mut self.scratch.view_mut(),
            &mut v.view_mut(),
            &mut self.handler_y,
            1,
        );
        v
    }

    /// Spectral space --> physical space, real part only
    pub fn backward_re(&mut self, vhat: &Array2<Complex64>) -> Array2<f64> {
        self.backward(vhat).mapv(|c| c.re)
    }
}
